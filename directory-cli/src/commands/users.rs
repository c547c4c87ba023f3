use std::path::PathBuf;

use profile_directory::UserDirectory;

use crate::error::AppError;
use crate::util::provide_source;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "users", about = "List the users in the directory")]
pub struct Users {
    #[clap(short = 'i', long = "id", action, help = "Show user IDs")]
    entry_id: bool,
    #[clap(long, short, action, help = "Print the directory state as JSON")]
    json: bool,
}

impl Users {
    pub async fn run(&self, config: &Option<PathBuf>) -> Result<(), AppError> {
        let directory = UserDirectory::mount(provide_source(config)?);
        let state = directory.settled().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(());
        }

        for record in &state.records {
            if self.entry_id {
                println!("{}\t{}", record.id, record.display_name);
            } else {
                println!("{}", record.display_name);
            }
        }

        Ok(())
    }
}
