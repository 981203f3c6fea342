mod common;

mod authors;
mod comments;
