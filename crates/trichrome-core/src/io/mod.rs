pub mod border;
pub mod image_io;
pub mod split;
