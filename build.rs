fn main() {
    if cargo::target_os() == "android" {
        android::build();
    }
}

/// Compiles the Java sensor listener and dexes it so that
/// `src/android/support.rs` can inject it at runtime.
mod android {
    use crate::cargo;
    use android_build::{DebugInfo, Dexer, JavaBuild};
    use std::fs;
    use std::path::Path;

    const JAVA_SOURCE: &str = "src/android/TiltSupport.java";

    pub(super) fn build() {
        println!("cargo:rerun-if-changed={JAVA_SOURCE}");

        let android_jar =
            android_build::android_jar(None).expect("Unable to locate android.jar path");
        let out_dir = cargo::out_dir();
        let java_root = out_dir.join("java");
        let dex_dir = out_dir.join("dex");

        recreate_dir(&java_root.join("rs/tilt"));
        JavaBuild::new()
            .files(&[JAVA_SOURCE])
            .class_path(&android_jar)
            .classes_out_dir(&java_root)
            .java_source_version(8)
            .java_target_version(8)
            .debug_info(debug_info())
            .compile()
            .expect("java build failed");

        recreate_dir(&dex_dir);
        Dexer::new()
            .android_jar(&android_jar)
            .class_path(&java_root)
            .collect_classes(&java_root)
            .expect("compiled classes to be readable")
            .release(cargo::is_release_profile())
            .android_min_api(21)
            .out_dir(&dex_dir)
            .run()
            .expect("dexing failed");

        let dex_path = dex_dir.join("classes.dex");
        assert!(
            dex_path.exists(),
            "DEX file was not created at expected location: {}",
            dex_path.display()
        );
        println!("cargo:rustc-env=TILT_DEX_PATH={}", dex_path.display());
    }

    fn recreate_dir(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
        fs::create_dir_all(dir).expect("failed to create build directory");
    }

    fn debug_info() -> DebugInfo {
        let keep = !cargo::is_release_profile();
        DebugInfo {
            line_numbers: keep,
            source_files: keep,
            variables: keep,
        }
    }
}

mod cargo {
    use std::env;
    use std::path::PathBuf;

    pub(super) fn is_release_profile() -> bool {
        env::var("PROFILE").is_ok_and(|p| p == "release")
    }

    pub(super) fn out_dir() -> PathBuf {
        env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo").into()
    }

    pub(super) fn target_os() -> String {
        env::var("CARGO_CFG_TARGET_OS").expect("CARGO_CFG_TARGET_OS is set by cargo")
    }
}
