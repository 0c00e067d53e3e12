fn main() {
    if let Err(err) = nodeflow_history::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
