mod media_dto;

pub use media_dto::{
    max_upload_size, MediaResponseDto, UploadMediaDto, MAX_PHOTO_SIZE, MAX_VIDEO_SIZE,
};
