pub mod automatizacion;
pub mod home;
pub mod ia_media;
pub mod web3d;
