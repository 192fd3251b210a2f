//! Schema export command.

/// Print the GraphQL SDL to stdout.
#[allow(clippy::print_stdout)]
pub fn print() {
    println!("{}", quarry_api::graphql::sdl());
}
