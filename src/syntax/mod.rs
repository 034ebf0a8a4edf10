//! Syntax elements of JSON-LD documents: keywords, container mappings and
//! related lexical types.

mod container;
mod direction;
mod keyword;
mod nullable;

pub use container::{Container, ContainerKind};
pub use direction::{Direction, InvalidDirection};
pub use keyword::{is_keyword, is_keyword_like, Keyword, NotAKeyword};
pub use nullable::Nullable;
