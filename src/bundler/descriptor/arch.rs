//! CPU architecture types and utilities.

/// CPU architecture the bundle is built for.
///
/// Either declared explicitly in the descriptor's `[output]` section or
/// detected from the target triple during bundling.
///
/// # Examples
///
/// ```no_run
/// use scriptpack::bundler::Arch;
///
/// let arch = Arch::from_triple("x86_64-unknown-linux-gnu");
/// assert_eq!(arch, Arch::X86_64);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit) - Most common desktop/server architecture
    X86_64,
    /// x86 / i686 (32-bit) - Legacy 32-bit Intel
    X86,
    /// AArch64 / ARM64 (64-bit) - Apple Silicon, modern ARM devices
    AArch64,
    /// ARM with hard-float (32-bit) - Raspberry Pi and embedded ARM
    Armhf,
    /// ARM with soft-float (32-bit) - Older embedded ARM devices
    Armel,
    /// RISC-V (64-bit) - Emerging open architecture
    Riscv64,
}

impl Arch {
    /// Detects the architecture from a target triple.
    ///
    /// `"x86_64-unknown-linux-gnu"` becomes [`Arch::X86_64`], and so on.
    /// Unrecognized triples fall back to x86_64.
    pub fn from_triple(target: &str) -> Self {
        if target.starts_with("x86_64") {
            Arch::X86_64
        } else if target.starts_with('i') {
            Arch::X86
        } else if target.starts_with("aarch64") {
            Arch::AArch64
        } else if target.starts_with("arm") && target.contains("hf") {
            Arch::Armhf
        } else if target.starts_with("arm") {
            Arch::Armel
        } else if target.starts_with("riscv64") {
            Arch::Riscv64
        } else {
            Arch::X86_64 // fallback
        }
    }

    /// Short architecture label used in artifact file names.
    pub fn label(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "x86",
            Arch::AArch64 => "aarch64",
            Arch::Armhf => "armhf",
            Arch::Armel => "armel",
            Arch::Riscv64 => "riscv64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
