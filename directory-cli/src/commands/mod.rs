use clap::Subcommand;

mod link;
mod users;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Users(users::Users),
    Link(link::Link),
}
