fn main() {
    recrepo::cli::run();
}
