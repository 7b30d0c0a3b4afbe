//! Static catalog mapping app names to OS-specific package names.
//!
//! The checklist offers only the apps present in the current OS table. The
//! packaging kind is resolved here, once, so the Homebrew driver never has to
//! guess from the package name whether it is dealing with a cask.

/// How a package is delivered by the package manager. Only Homebrew
/// distinguishes the two; apt and Chocolatey ignore the kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PackageKind {
    #[default]
    Formula,
    Cask,
}

/// One item of a batch handed to a driver: the package-manager-facing name
/// plus its catalog-resolved packaging kind.
#[derive(Clone, Debug, PartialEq)]
pub struct PackageSpec {
    pub name: String,
    pub kind: PackageKind,
}

impl PackageSpec {
    pub fn formula(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PackageKind::Formula,
        }
    }

    pub fn cask(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PackageKind::Cask,
        }
    }
}

/// Catalog row: human-readable app name and its package for one OS.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub app: &'static str,
    pub package: &'static str,
    pub kind: PackageKind,
}

impl CatalogEntry {
    pub fn spec(&self) -> PackageSpec {
        PackageSpec {
            name: self.package.to_string(),
            kind: self.kind,
        }
    }
}

const fn formula(app: &'static str, package: &'static str) -> CatalogEntry {
    CatalogEntry {
        app,
        package,
        kind: PackageKind::Formula,
    }
}

const fn cask(app: &'static str, package: &'static str) -> CatalogEntry {
    CatalogEntry {
        app,
        package,
        kind: PackageKind::Cask,
    }
}

const LINUX: &[CatalogEntry] = &[
    formula("7-Zip", "p7zip-full"),
    formula("Docker", "docker.io"),
    formula("Firefox", "firefox"),
    formula("GIMP", "gimp"),
    formula("Git", "git"),
    formula("Node.js", "nodejs"),
    formula("VLC", "vlc"),
    formula("curl", "curl"),
    formula("htop", "htop"),
    formula("wget", "wget"),
];

const MACOS: &[CatalogEntry] = &[
    formula("7-Zip", "p7zip"),
    cask("Docker", "docker"),
    cask("Firefox", "firefox"),
    cask("GIMP", "gimp"),
    formula("Git", "git"),
    cask("Hyper", "hyper"),
    formula("Node.js", "node"),
    cask("Slack", "slack"),
    cask("Spotify", "spotify"),
    cask("VLC", "vlc"),
    cask("Visual Studio Code", "visual-studio-code"),
    formula("htop", "htop"),
    formula("wget", "wget"),
];

const WINDOWS: &[CatalogEntry] = &[
    formula("7-Zip", "7zip"),
    formula("Docker", "docker-desktop"),
    formula("Firefox", "firefox"),
    formula("GIMP", "gimp"),
    formula("Git", "git"),
    formula("Hyper", "hyper"),
    formula("Node.js", "nodejs"),
    formula("Slack", "slack"),
    formula("Spotify", "spotify"),
    formula("VLC", "vlc"),
    formula("Visual Studio Code", "vscode"),
    formula("curl", "curl"),
    formula("wget", "wget"),
];

/// Catalog for an OS identifier as reported by `std::env::consts::OS`.
/// Unknown identifiers yield an empty catalog. Entries are ordered by app
/// name, which is the order the checklist renders them in.
pub fn catalog_for(os: &str) -> &'static [CatalogEntry] {
    match os {
        "linux" => LINUX,
        "macos" => MACOS,
        "windows" => WINDOWS,
        _ => &[],
    }
}

/// Look up the package for an app on the given OS.
pub fn lookup(os: &str, app: &str) -> Option<PackageSpec> {
    catalog_for(os)
        .iter()
        .find(|e| e.app == app)
        .map(CatalogEntry::spec)
}
