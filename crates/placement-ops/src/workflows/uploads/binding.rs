use std::path::{Path, PathBuf};

/// Static configuration tying one database table/column to one upload folder
/// for reconciliation. Bindings are enumerated once at startup, never
/// discovered from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBinding {
    pub display_name: String,
    pub table: String,
    pub column: String,
    pub folder: PathBuf,
}

impl UploadBinding {
    pub fn new(
        display_name: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            table: table.into(),
            column: column.into(),
            folder: folder.into(),
        }
    }
}

/// The portal's stock bindings, rooted at the configured uploads directory.
pub fn default_bindings(uploads_root: &Path) -> Vec<UploadBinding> {
    vec![
        UploadBinding::new(
            "Internship Certificates",
            "student_internship",
            "certificate",
            uploads_root.join("certificates"),
        ),
        UploadBinding::new(
            "Placement Offer Letters",
            "student_placement",
            "offerletter_file_name",
            uploads_root.join("offer_letters"),
        ),
        UploadBinding::new(
            "Expenditure Bills",
            "expenditure",
            "bill_file",
            uploads_root.join("expenditure"),
        ),
    ]
}
