//! Source listing command implementation.

use quarry_sources::{available_sources, sources_for};
use quarry_traits::DataType;

/// List registered sources, optionally filtered by data type.
pub(crate) fn list_sources(data_type: Option<DataType>) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Sources                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for dt in DataType::ALL {
        if data_type.is_some_and(|filter| filter != dt) {
            continue;
        }

        println!("{dt}:");
        println!("{}", "-".repeat(60));
        for source in sources_for(dt) {
            let key = if source.api_key_required { "key" } else { "   " };
            println!("  {:10} {:15} {key}  {}", source.key, source.name, source.base_url);
        }
        println!();
    }

    println!(
        "{} sources registered. \"key\" marks sources that need API_KEY.\n",
        available_sources().len()
    );
}
