//! Word validation against allowed-guess lists

mod source;
mod validator;

pub use source::{
    DictionaryError, DictionaryLocation, DirWordListSource, HttpWordListSource, WordListSource,
    list_file_name,
};
pub use validator::{Dictionary, WordValidator};
