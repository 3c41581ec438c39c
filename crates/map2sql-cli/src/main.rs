fn main() {
    if let Err(e) = map2sql_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
