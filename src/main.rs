fn main() {
    if let Err(e) = doozie_search_lib::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
