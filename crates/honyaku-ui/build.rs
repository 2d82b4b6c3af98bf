fn main() {
    slint_build::compile("ui/app.slint").expect("failed to compile ui/app.slint");
}
