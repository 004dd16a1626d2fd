fn main() {
    let code = sanitize_precision::run(std::env::args_os());
    std::process::exit(code);
}
