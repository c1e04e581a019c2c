pub mod body;
pub mod camera;
pub mod constants;
pub mod controls;
pub mod error;
pub mod interaction;
pub mod record;
pub mod scene;
pub mod skeleton;
pub mod transform;

pub use body::*;
pub use constants::*;
pub use camera::*;
pub use controls::*;
pub use error::*;
pub use interaction::*;
pub use record::*;
pub use scene::*;
pub use transform::*;
