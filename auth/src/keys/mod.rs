pub mod errors;
pub mod material;

pub use errors::KeyError;
pub use material::KeyMaterial;
pub use material::PRIVATE_KEY_FILE;
pub use material::PUBLIC_KEY_FILE;
