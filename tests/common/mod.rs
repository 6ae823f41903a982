use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn generate_grants_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["player", "name", "amount", "currency"])?;

    for i in 1..=rows {
        wtr.write_record([
            i.to_string(),
            format!("player-{i}"),
            "1.0".to_string(),
            String::new(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
