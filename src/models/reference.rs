use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarView {
    pub id: i32,
    pub value: i32,
}
