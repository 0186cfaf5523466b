pub mod photo;
pub mod photo_detail;
pub mod photo_tag;
pub mod tag;
pub mod tag_name;
