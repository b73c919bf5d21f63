use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Directory holding the bundled `*.yaml` recipes.
pub static PATH_GAMEDATA: LazyLock<PathBuf> = LazyLock::new(|| {
    let localinstall = PathBuf::from("/usr/share/vgmx/gamedata");
    if localinstall.exists() {
        return localinstall;
    }
    if let Ok(exe) = env::current_exe()
        && let Some(dir) = exe.parent()
        && dir.join("gamedata").is_dir()
    {
        return dir.join("gamedata");
    }
    PathBuf::from("gamedata")
});
