use std::path::PathBuf;

use anyhow::Error;
use chrono::Utc;
use clap::Parser;
use menu_sync::Source;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, value_enum, default_value_t = Source::Remote)]
    source: Source,

    /// Write a JSON snapshot here
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Use another CMS origin instead of https://{domain}.microcms.io
    #[arg(long, env = "MICROCMS_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    let cms = menu_sync::credentials_from_env()
        .map(|credentials| menu_sync::cms_client(&credentials, args.base_url.as_deref()));

    let menu = menu_sync::load_menu(args.source, cms.as_ref()).await?;
    menu_sync::print_menu(&menu);

    if let Some(out) = &args.out {
        menu_sync::write_snapshot(&menu, out, Utc::now())?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}
