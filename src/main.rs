fn main() {
    brillianse::app::cli::run();
}
