use crate::assembler::ThreadView;
use crate::comments::{CommentService, NewComment, NewReply};
use crate::config::ForumConfig;
use crate::database::models::UserRecord;
use crate::database::Database;
use crate::likes::{LikeService, LikeState};
use crate::threading::{NewThread, ThreadService};
use crate::users::UserService;
use anyhow::{anyhow, Result};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run the interactive CLI used for managing threads, comments, and likes.
pub async fn run_cli(config: ForumConfig, database: Database) -> Result<()> {
    let mut session = CliSession {
        recent_limit: config.recent_limit,
        users: UserService::new(database.clone()),
        threads: ThreadService::new(database.clone()),
        comments: CommentService::new(database.clone()),
        likes: LikeService::new(database),
        current_user: None,
    };

    println!("Forum CLI ready. Type 'help' for a list of commands.");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        print!("{}> ", session.prompt());
        io::stdout().flush()?;

        let mut line = String::new();
        let read = reader.read_line(&mut line).await?;
        if read == 0 {
            println!("Exiting");
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let tokens = match shell_words::split(trimmed) {
            Ok(tokens) if !tokens.is_empty() => tokens,
            Ok(_) => continue,
            Err(err) => {
                println!("Unable to parse command: {err}");
                continue;
            }
        };

        match session.handle_command(&tokens).await {
            Ok(LoopAction::Continue) => {}
            Ok(LoopAction::Exit) => break,
            Err(err) => {
                println!("Error: {err:#}");
            }
        }
    }

    Ok(())
}

struct CliSession {
    recent_limit: usize,
    users: UserService,
    threads: ThreadService,
    comments: CommentService,
    likes: LikeService,
    current_user: Option<UserRecord>,
}

enum LoopAction {
    Continue,
    Exit,
}

impl CliSession {
    fn prompt(&self) -> &str {
        self.current_user
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("forum")
    }

    fn owner(&self) -> Result<String> {
        self.current_user
            .as_ref()
            .map(|user| user.id.clone())
            .ok_or_else(|| anyhow!("no acting user; run 'as <username>' first"))
    }

    async fn handle_command(&mut self, tokens: &[String]) -> Result<LoopAction> {
        let command = tokens[0].as_str();
        match command {
            "help" => {
                self.print_help();
                Ok(LoopAction::Continue)
            }
            "as" | "user" => {
                if tokens.len() < 2 {
                    println!("Usage: as <username>");
                    return Ok(LoopAction::Continue);
                }
                let user = self.users.ensure(&tokens[1])?;
                println!("Acting as {} ({})", user.username, user.id);
                self.current_user = Some(user);
                Ok(LoopAction::Continue)
            }
            "list-threads" | "threads" => {
                let limit = tokens
                    .get(1)
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(self.recent_limit);
                self.list_threads(limit)?;
                Ok(LoopAction::Continue)
            }
            "view-thread" | "thread" => {
                if tokens.len() < 2 {
                    println!("Usage: view-thread <thread_id>");
                    return Ok(LoopAction::Continue);
                }
                let view = self.threads.get_thread(&tokens[1]).await?;
                print_thread(&view);
                Ok(LoopAction::Continue)
            }
            "new-thread" | "create-thread" => {
                if tokens.len() < 3 {
                    println!("Usage: new-thread \"title\" \"body\"");
                    return Ok(LoopAction::Continue);
                }
                let added = self.threads.create_thread(NewThread {
                    title: tokens[1].clone(),
                    body: tokens[2..].join(" "),
                    owner: self.owner()?,
                })?;
                println!("Created thread {}", added.id);
                Ok(LoopAction::Continue)
            }
            "comment" => {
                if tokens.len() < 3 {
                    println!("Usage: comment <thread_id> \"message\"");
                    return Ok(LoopAction::Continue);
                }
                let added = self.comments.add_comment(NewComment {
                    thread_id: tokens[1].clone(),
                    content: tokens[2..].join(" "),
                    owner: self.owner()?,
                })?;
                println!("Posted comment {}", added.id);
                Ok(LoopAction::Continue)
            }
            "reply" => {
                if tokens.len() < 4 {
                    println!("Usage: reply <thread_id> <comment_id> \"message\"");
                    return Ok(LoopAction::Continue);
                }
                let added = self.comments.add_reply(NewReply {
                    thread_id: tokens[1].clone(),
                    comment_id: tokens[2].clone(),
                    content: tokens[3..].join(" "),
                    owner: self.owner()?,
                })?;
                println!("Posted reply {}", added.id);
                Ok(LoopAction::Continue)
            }
            "delete-comment" => {
                if tokens.len() < 3 {
                    println!("Usage: delete-comment <thread_id> <comment_id>");
                    return Ok(LoopAction::Continue);
                }
                self.comments.delete_comment(&tokens[1], &tokens[2])?;
                println!("Deleted comment {}", tokens[2]);
                Ok(LoopAction::Continue)
            }
            "delete-reply" => {
                if tokens.len() < 4 {
                    println!("Usage: delete-reply <thread_id> <comment_id> <reply_id>");
                    return Ok(LoopAction::Continue);
                }
                self.comments
                    .delete_reply(&tokens[1], &tokens[2], &tokens[3])?;
                println!("Deleted reply {}", tokens[3]);
                Ok(LoopAction::Continue)
            }
            "like" | "unlike" => {
                if tokens.len() < 3 {
                    println!("Usage: like <thread_id> <comment_id>");
                    return Ok(LoopAction::Continue);
                }
                let owner = self.owner()?;
                match self.likes.toggle_like(&tokens[1], &tokens[2], &owner)? {
                    LikeState::Liked => println!("Liked {}", tokens[2]),
                    LikeState::Unliked => println!("Unliked {}", tokens[2]),
                }
                Ok(LoopAction::Continue)
            }
            "quit" | "exit" => Ok(LoopAction::Exit),
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                Ok(LoopAction::Continue)
            }
            other => {
                println!("Unknown command '{other}'. Type 'help' for a list of commands.");
                Ok(LoopAction::Continue)
            }
        }
    }

    fn print_help(&self) {
        println!("Available commands:");
        println!("  help                       Show this help message");
        println!("  as <username>              Act as a user, registering it if new");
        println!("  list-threads [N]           List recent threads (default {})", self.recent_limit);
        println!("  view-thread <id>           Display a thread with comments and replies");
        println!("  new-thread TITLE BODY      Create a new thread");
        println!("  comment <thread_id> MSG    Comment on a thread");
        println!("  reply <thread_id> <comment_id> MSG");
        println!("                             Reply to a comment");
        println!("  delete-comment <thread_id> <comment_id>");
        println!("  delete-reply <thread_id> <comment_id> <reply_id>");
        println!("  like <thread_id> <comment_id>");
        println!("                             Like a comment, or unlike it if already liked");
        println!("  clear                      Clear the screen");
        println!("  exit                       Quit the CLI");
    }

    fn list_threads(&self, limit: usize) -> Result<()> {
        let summaries = self.threads.list_threads(limit)?;
        if summaries.is_empty() {
            println!("No threads yet. Use 'new-thread' to create one.");
            return Ok(());
        }
        println!("Threads:");
        for summary in summaries {
            println!(
                "  [{}] {} by {} ({})",
                summary.id, summary.title, summary.username, summary.date
            );
        }
        Ok(())
    }
}

fn print_thread(view: &ThreadView) {
    println!("Thread: {} ({})", view.title, view.id);
    println!("By {} at {}", view.username, view.date);
    println!("{}", view.body);
    if view.comments.is_empty() {
        println!("  (no comments yet)");
    }
    for (index, comment) in view.comments.iter().enumerate() {
        println!();
        println!(
            "Comment #{} ({}) by {} at {} [likes: {}]",
            index + 1,
            comment.id,
            comment.username,
            comment.date,
            comment.like_count
        );
        println!("  {}", comment.content);
        for reply in &comment.replies {
            println!("    - {} ({}) by {}: {}", reply.id, reply.date, reply.username, reply.content);
        }
    }
}
