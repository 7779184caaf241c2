fn main() {
    if let Err(err) = sheet_filter::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
