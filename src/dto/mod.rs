pub mod generation_dto;
pub mod source_dto;
