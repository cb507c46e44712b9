fn main() {
    powermeter_ui::mount();
}
