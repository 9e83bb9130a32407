fn main() {
    if let Err(err) = feedback_rollup::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
