pub mod paged_response;
pub mod photo_dto;
