//! Types shared between the suggestion core, the HTTP suggestion endpoint and
//! whatever renders the suggestion list.

mod encoding;
pub mod navigation;
pub mod suggestion;

pub use encoding::encode_component;
pub use navigation::DisplayContext;
pub use navigation::NavigationTarget;
pub use navigation::RESULTS_PATH;
pub use navigation::RouteType;
pub use suggestion::Category;
pub use suggestion::Suggestion;
