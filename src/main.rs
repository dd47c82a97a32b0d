fn main() {
    lightcurve_plotter::cli::run();
}
