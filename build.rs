fn main() {
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "Bench Scope");
        res.compile().expect("Failed to compile Windows resources");
    }
}
