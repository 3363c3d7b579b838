//! Paths shared by every project regardless of template.

/// Project descriptor file, always at the project root.
pub struct DescriptorFile;

impl DescriptorFile {
    pub const NAME: &'static str = "project.json";

    /// Sibling used while the descriptor is being replaced.
    pub const TEMP_NAME: &'static str = "project.json.tmp";

    /// Returns true if a project-relative path addresses the descriptor or its temp file.
    pub fn is_reserved(relative_path: &str) -> bool {
        relative_path == Self::NAME || relative_path == Self::TEMP_NAME
    }
}

/// Source root created for every template.
#[derive(Debug, Clone, Copy)]
pub struct SrcDir;

impl SrcDir {
    pub const NAME: &'static str = "src";
}
