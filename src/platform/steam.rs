//! Steam platform
//!
//! Library discovery and install-folder resolution for Steam games.

mod libraries;
mod locate;

pub use libraries::discover_library_roots;
pub use locate::find_install_dir;
