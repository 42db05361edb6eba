mod bin;
mod instance;
mod item;
mod placement;
mod solution;

#[doc(inline)]
pub use bin::Bin;
#[doc(inline)]
pub use instance::Instance;
#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use placement::Placement;
#[doc(inline)]
pub use solution::{Solution, SolutionOrigin};
