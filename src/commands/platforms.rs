//! pfm platforms コマンド
//!
//! 追加可能なプラットフォームの一覧を表示する。

use crate::error::Result;
use crate::platform::PlatformRegistry;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Debug, Parser)]
pub struct Args {
    /// Output only platform names
    #[arg(long)]
    pub simple: bool,
}

pub fn run(args: Args) -> Result<()> {
    let registry = PlatformRegistry::builtin();

    if args.simple {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    println!("{}", build_table(&registry));
    Ok(())
}

fn build_table(registry: &PlatformRegistry) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Platform", "Library"]);
    for platform in registry.iter() {
        table.add_row(vec![
            platform.name().to_string(),
            platform.display_name().to_string(),
            platform.repo(),
        ]);
    }
    table
}
