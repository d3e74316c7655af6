use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "podcastr")]
#[command(about = "Podcast listing and episode pages, statically generated and revalidated", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Render the pre-rendered pages to a directory and exit
    Build(BuildArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (defaults to server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,

    /// Skip static generation at startup; pages render on first request
    #[arg(long)]
    pub lazy: bool,
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Output directory (defaults to build.out_dir)
    #[arg(long)]
    pub out: Option<PathBuf>,
}
