pub mod remote;
pub mod serialization;
pub mod session;
pub mod store;
pub mod traits;

pub use remote::*;
pub use serialization::*;
pub use session::*;
pub use store::*;
pub use traits::*;
