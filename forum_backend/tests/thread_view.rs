use forum_backend::assembler::{
    ThreadViewAssembler, DELETED_COMMENT_PLACEHOLDER, DELETED_REPLY_PLACEHOLDER,
};
use forum_backend::bootstrap;
use forum_backend::comments::{CommentService, NewComment, NewReply};
use forum_backend::config::{ForumConfig, ForumPaths};
use forum_backend::database::Database;
use forum_backend::likes::LikeService;
use forum_backend::sources::SqliteForumSource;
use forum_backend::threading::{NewThread, ThreadService};
use forum_backend::users::UserService;
use serde_json::json;
use tempfile::tempdir;

struct Ids {
    thread: String,
    first_comment: String,
    second_comment: String,
    reply: String,
}

fn seed(database: &Database) -> Ids {
    let users = UserService::new(database.clone());
    let dicoding = users.ensure("dicoding").expect("user").id;
    let jhon = users.ensure("jhon").expect("user").id;

    let thread = ThreadService::new(database.clone())
        .create_thread(NewThread {
            title: "ini adalah judul thread".into(),
            body: "ini adalah isi thread".into(),
            owner: dicoding.clone(),
        })
        .expect("thread")
        .id;

    let comments = CommentService::new(database.clone());
    let first_comment = comments
        .add_comment(NewComment {
            thread_id: thread.clone(),
            content: "ini adalah isi komentar".into(),
            owner: dicoding.clone(),
        })
        .expect("comment")
        .id;
    let second_comment = comments
        .add_comment(NewComment {
            thread_id: thread.clone(),
            content: "komentar kedua".into(),
            owner: jhon.clone(),
        })
        .expect("comment")
        .id;
    let reply = comments
        .add_reply(NewReply {
            thread_id: thread.clone(),
            comment_id: first_comment.clone(),
            content: "ini adalah isi balasan".into(),
            owner: jhon.clone(),
        })
        .expect("reply")
        .id;

    let likes = LikeService::new(database.clone());
    likes
        .toggle_like(&thread, &first_comment, &dicoding)
        .expect("like");
    likes.toggle_like(&thread, &first_comment, &jhon).expect("like");

    Ids {
        thread,
        first_comment,
        second_comment,
        reply,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn assembled_view_survives_reopen_and_serializes() {
    let temp = tempdir().expect("tempdir");
    let config = ForumConfig::new(ForumPaths::from_base_dir(temp.path()).expect("paths"));

    let resources = bootstrap::initialize(&config).expect("bootstrap");
    assert!(resources.database_initialized);
    let ids = seed(&resources.database);
    drop(resources);

    let reopened = bootstrap::initialize(&config).expect("reopen");
    assert!(!reopened.database_initialized);
    let assembler = ThreadViewAssembler::from_source(SqliteForumSource::new(reopened.database));
    let view = assembler.assemble(&ids.thread).await.expect("view");

    let json = serde_json::to_value(&view).expect("json");
    assert_eq!(json["id"], json!(ids.thread));
    assert_eq!(json["title"], "ini adalah judul thread");
    assert_eq!(json["username"], "dicoding");

    let comments = json["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["id"], json!(ids.first_comment));
    assert_eq!(comments[0]["likeCount"], 2);
    assert_eq!(comments[0]["content"], "ini adalah isi komentar");
    assert_eq!(
        comments[0]["replies"],
        json!([{
            "id": ids.reply,
            "content": "ini adalah isi balasan",
            "date": comments[0]["replies"][0]["date"],
            "username": "jhon",
        }])
    );
    assert_eq!(comments[1]["id"], json!(ids.second_comment));
    assert_eq!(comments[1]["likeCount"], 0);
    assert_eq!(comments[1]["replies"], json!([]));
}

#[tokio::test]
async fn deleted_records_are_redacted_end_to_end() {
    let database = Database::open_in_memory().expect("db");
    let ids = seed(&database);

    let comments = CommentService::new(database.clone());
    comments
        .delete_reply(&ids.thread, &ids.first_comment, &ids.reply)
        .expect("delete reply");
    comments
        .delete_comment(&ids.thread, &ids.first_comment)
        .expect("delete comment");

    let view = ThreadService::new(database)
        .get_thread(&ids.thread)
        .await
        .expect("view");

    let first = &view.comments[0];
    assert_eq!(first.content, DELETED_COMMENT_PLACEHOLDER);
    assert_eq!(first.username, "dicoding");
    assert_eq!(first.like_count, 2);
    assert_eq!(first.replies[0].content, DELETED_REPLY_PLACEHOLDER);
    assert_eq!(view.comments[1].content, "komentar kedua");
}

#[tokio::test]
async fn unknown_thread_yields_not_found() {
    let database = Database::open_in_memory().expect("db");
    seed(&database);

    let err = ThreadService::new(database)
        .get_thread("thread-does-not-exist")
        .await
        .expect_err("missing thread");

    assert!(err.is_not_found());
}
