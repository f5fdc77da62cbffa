// Integration test utilities and fixture projects for Quanta of Code.

use std::path::{Path, PathBuf};

use quanta_core::analysis::Analyzer;
use quanta_core::config::{DiscoverySection, QuantaConfig};
use quanta_core::pipeline::{BatchAnalyzer, BatchOutcome, FailurePolicy, discover_files};
use quanta_core::progress::NoopReporter;
use quanta_core::weights::WeightRegistry;

/// A temporary directory populated with source files.
#[derive(Debug)]
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.file(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    /// One small, cleanly parsing file per supported language, plus files
    /// discovery must ignore.
    pub fn multi_language() -> Self {
        let project = Self::empty();
        project.write(
            "src/shapes.py",
            "class Shape:\n    def __init__(self, name):\n        self.name = name\n\n    def area(self):\n        return 0\n",
        );
        project.write(
            "src/app.js",
            "function greet(name) {\n  return `hello ${name}`;\n}\n\nclass Greeter {\n  run() { return greet('x'); }\n}\n",
        );
        project.write(
            "src/types.ts",
            "interface Point {\n  x: number;\n  y: number;\n}\n\nfunction norm(p: Point): number {\n  return Math.sqrt(p.x * p.x + p.y * p.y);\n}\n",
        );
        project.write(
            "src/App.java",
            "public class App {\n    public static void main(String[] args) {\n        System.out.println(\"hi\");\n    }\n}\n",
        );
        project.write(
            "src/vec.cpp",
            "#include <vector>\n\nint sum(const std::vector<int>& v) {\n    int s = 0;\n    for (int x : v) { s += x; }\n    return s;\n}\n",
        );
        project.write(
            "src/lib.rs",
            "pub struct Counter {\n    n: u32,\n}\n\nimpl Counter {\n    pub fn bump(&mut self) {\n        self.n += 1;\n    }\n}\n",
        );
        project.write(
            "src/util/math.go",
            "package util\n\nfunc Add(a, b int) int {\n\treturn a + b\n}\n",
        );
        project.write("README.md", "# Fixture\n");
        project.write("node_modules/dep/index.js", "module.exports = 1;\n");
        project
    }

    /// The same module before and after a refactor that adds a class.
    pub fn before_after() -> Self {
        let project = Self::empty();
        project.write(
            "before.py",
            "def area(w, h):\n    return w * h\n",
        );
        project.write(
            "after.py",
            "class Rect:\n    def __init__(self, w, h):\n        self.w = w\n        self.h = h\n\n    def area(self):\n        return self.w * self.h\n",
        );
        project
    }

    /// A React component in `.tsx` next to a plain `.ts` module.
    pub fn typescript_with_jsx() -> Self {
        let project = Self::empty();
        project.write(
            "src/App.tsx",
            "type Props = { name: string };\n\nexport function App({ name }: Props) {\n  return <main><Title text={name} /></main>;\n}\n",
        );
        project.write(
            "src/b.ts",
            "export const twice = (n: number): number => n * 2;\n",
        );
        project
    }

    /// A project where one file fails to parse and one file is empty.
    pub fn with_broken_file() -> Self {
        let project = Self::empty();
        project.write("ok.py", "x = 1\ny = 2\n");
        project.write("broken.py", "def broken(:\n    pass\n");
        project.write("empty.py", "");
        project
    }
}

/// The built-in weight tables.
pub fn builtin_weights() -> WeightRegistry {
    QuantaConfig::builtin()
        .expect("builtin config parses")
        .weight_registry()
        .expect("builtin weights are valid")
}

/// Discover every supported file under `root` recursively and analyze them
/// with the built-in weights.
pub fn run_batch(root: &Path, policy: FailurePolicy) -> BatchOutcome {
    let weights = builtin_weights();
    let analyzer = Analyzer::new(&weights);
    let files = discover_files(root, true, &DiscoverySection::default(), analyzer.languages())
        .expect("discover files");
    BatchAnalyzer::new(analyzer)
        .run(&files, policy, &NoopReporter)
        .expect("batch run")
}
