/// Fixed argument tables and the default build target.
///
/// All tables are process-wide immutable constants. They are copied by value
/// into each assembled command; nothing here is mutated at runtime.
use crate::config::types::Target;

/// Fixed C++ compile command: strict warnings-as-errors, debug symbols,
/// optimization, trap on signed overflow.
pub const GPP_ARGS: &[&str] = &[
    "g++",
    "-std=gnu++17",
    "-g",
    "-O2",
    "-Werror",
    "-Wall",
    "-Wextra",
    "-ftrapv",
];

/// Sanitizer compile flags. No recovery: UB must terminate the process
/// observably instead of continuing silently.
pub const SANITIZER_ARGS: &[&str] = &[
    "-fsanitize=address",
    "-fsanitize=undefined",
    "-fno-sanitize-recover=all",
];

/// Environment overlay applied to sanitized runs.
pub const SANITIZER_ENV: &[(&str, &str)] = &[("ASAN_OPTIONS", "color=always")];

/// Memory-checker invocation prefixed in front of the target command.
pub const MEMCHECK_ARGS: &[&str] = &["valgrind", "--leak-check=full"];

/// Name the compiler falls back to when no output file is configured.
pub const DEFAULT_BINARY_NAME: &str = "a.out";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Default build target for plain C (and 32-bit assembly) solutions.
pub fn default_target() -> Target {
    Target {
        name: "default".to_string(),
        compiler: "gcc".to_string(),
        flags: strings(&[
            "-std=gnu11",
            "-g",
            "-O2",
            "-Werror",
            "-Wall",
            "-Wextra",
            "-ftrapv",
        ]),
        libs: strings(&["m"]),
        out: Some("solution".to_string()),
        files: strings(&["*.c", "*.s", "*.S"]),
        asm64bit: false,
        default_sanitizer: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_shape() {
        let target = default_target();
        assert_eq!(target.compiler, "gcc");
        assert!(!target.files.is_empty());
        assert!(target.default_sanitizer);
        assert!(!target.asm64bit);
    }

    #[test]
    fn test_memcheck_prefix_is_stable() {
        assert_eq!(MEMCHECK_ARGS, ["valgrind", "--leak-check=full"]);
    }
}
