mod assets;
pub use assets::*;
use cfg_if::cfg_if;

cfg_if!(
    if #[cfg(feature = "assets")] {
        mod cupertino_assets;
        pub use cupertino_assets::*;
    }
);
