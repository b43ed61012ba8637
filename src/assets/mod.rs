pub mod avatar;
pub mod blur;
pub mod decode;
pub mod dither;
