fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CUDA_PATH");
    println!("cargo:rerun-if-env-changed=CUDA_HOME");

    #[cfg(feature = "cufft")]
    {
        use std::env;
        use std::path::PathBuf;

        let root = env::var("CUDA_PATH")
            .or_else(|_| env::var("CUDA_HOME"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/usr/local/cuda"));
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        let lib_dir = if target_os == "windows" {
            root.join("lib").join("x64")
        } else {
            root.join("lib64")
        };
        if lib_dir.exists() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        } else {
            // Fall back to whatever the system linker finds
            println!(
                "cargo:warning=CUDA library directory {} not found",
                lib_dir.display()
            );
        }
    }

    #[cfg(feature = "rocfft")]
    println!("cargo:warning=rocfft backend is a placeholder; its timings will stay at 0");

    #[cfg(feature = "vkfft")]
    println!("cargo:warning=vkfft backend is a placeholder; its timings will stay at 0");
}
