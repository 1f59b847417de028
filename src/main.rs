fn main() {
    extraa_frontend::run();
}
