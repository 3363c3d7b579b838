//! Paths created by project templates.

/// Entry point written by the `basic` template.
pub struct MainJavaFile;

impl MainJavaFile {
    pub const NAME: &'static str = "Main.java";
    pub const PATH: &'static str = "src/Main.java";
}

/// Maven source roots.
pub struct MavenSourceDirs;

impl MavenSourceDirs {
    pub const MAIN: &'static str = "src/main/java";
    pub const TEST: &'static str = "src/test/java";
    pub const ALL: [&'static str; 2] = [Self::MAIN, Self::TEST];
}

/// Maven build descriptor written by the `maven` template.
pub struct PomFile;

impl PomFile {
    pub const NAME: &'static str = "pom.xml";
}
