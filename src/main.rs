fn main() {
  lift_sheet_lib::run()
}
