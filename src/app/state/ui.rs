use crate::library::Book;

/// Which top-level view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Library,
    Reader,
}

pub struct ShelfState {
    pub(in crate::app) books: Vec<Book>,
    pub(in crate::app) importing: bool,
    pub(in crate::app) opening: Option<String>,
    pub(in crate::app) status: Option<String>,
}

impl ShelfState {
    pub(in crate::app) fn new() -> Self {
        Self {
            books: Vec::new(),
            importing: false,
            opening: None,
            status: None,
        }
    }
}
