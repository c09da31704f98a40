//! Extraction handlers - structured user data with a presence-based fallback.

mod extract_user_info;

pub use extract_user_info::{
    ExtractUserInfoCommand, ExtractUserInfoHandler, ExtractUserInfoResult, EXTRACTION_INSTRUCTIONS,
};
