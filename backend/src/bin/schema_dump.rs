//! Print the GraphQL schema definition language.

use std::io::Write;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(petsocial::inbound::graphql::schema_sdl().as_bytes())?;
    Ok(())
}
