use std::path::PathBuf;

use profile_directory::resolve_link;

use crate::error::AppError;
use crate::util::provide_source;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "link", about = "Print the decisions folder link")]
pub struct Link {
    #[clap(long, short, action, help = "Also print the drive name")]
    drive: bool,
}

impl Link {
    pub async fn run(&self, config: &Option<PathBuf>) -> Result<(), AppError> {
        let source = provide_source(config)?;
        let link = resolve_link(source.as_ref())
            .await
            .map_err(|e| AppError::LinkError(e.to_string()))?;

        println!("{}", link.folder_url);
        if self.drive {
            if let Some(drive) = &link.drive_name {
                println!("Drive: {}", drive);
            }
        }

        Ok(())
    }
}
