use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Debug, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i32,
    pub snippet_id: i32,
    pub author: String,
    pub content: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub upvotes: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub snippet_id: i32,
    pub author: &'a str,
    pub content: &'a str,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub upvotes: i32,
}

impl Comment {
    pub fn new_for_snippet<'a>(snippet_id: i32, author: &'a str, content: &'a str) -> NewComment<'a> {
        let now = chrono::Utc::now().naive_utc();
        NewComment {
            snippet_id,
            author,
            content,
            created: now,
            updated: now,
            upvotes: 0,
        }
    }
}
