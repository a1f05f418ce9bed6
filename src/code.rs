//! Source listings shown beside the time visualizer.
//!
//! Step line numbers refer to the JavaScript listing. Other languages share
//! the numbering where a line with that number exists.

use std::str::FromStr;

use crate::{Complexity, ParseError};

/// Display language of the code panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    #[default]
    JavaScript,
    Python,
    Java,
    Cpp,
    CSharp,
    Go,
    Rust,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Rust,
        Language::TypeScript,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::TypeScript => "TypeScript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "c++" | "cpp" => Ok(Language::Cpp),
            "c#" | "csharp" | "cs" => Ok(Language::CSharp),
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            "typescript" | "ts" => Ok(Language::TypeScript),
            _ => Err(ParseError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Line to highlight in `language`'s listing for a step on JavaScript line
/// `line`, or `None` when that listing is shorter.
///
/// ```rust
/// use complexity_view::code::{highlight, Language};
/// use complexity_view::Complexity;
///
/// assert_eq!(highlight(Language::Python, Complexity::Linear, 3), Some(3));
/// assert_eq!(highlight(Language::Python, Complexity::Constant, 4), None);
/// ```
pub fn highlight(language: Language, complexity: Complexity, line: usize) -> Option<usize> {
    (1..=listing(language, complexity).len()).contains(&line).then_some(line)
}

/// Source lines of the algorithm for `complexity` in `language`.
pub fn listing(language: Language, complexity: Complexity) -> &'static [&'static str] {
    use Complexity::*;

    match language {
        Language::JavaScript => match complexity {
            Constant => &[
                "function accessElement(arr, index) {",
                "  print(\"Accessing element at \" + index);",
                "  return arr[index];",
                "}",
            ],
            Logarithmic => &[
                "function binarySearch(arr, target) {",
                "  let low = 0, high = arr.length - 1;",
                "  while (low <= high) {",
                "    let mid = Math.floor((low + high) / 2);",
                "    if (arr[mid] === target) return mid;",
                "    else if (arr[mid] < target) low = mid + 1;",
                "    else high = mid - 1;",
                "  }",
                "  return -1;",
                "}",
            ],
            Linear => &[
                "function printAll(arr) {",
                "  for (let i = 0; i < arr.length; i++) {",
                "    print(arr[i]);",
                "  }",
                "}",
            ],
            Linearithmic => &[
                "function mergeSort(arr) {",
                "  for (let width = 1; width < arr.length; width *= 2) {",
                "    for (let i = 0; i < arr.length; i++) {",
                "      place(arr, i, width);",
                "    }",
                "  }",
                "}",
            ],
            Quadratic => &[
                "function printPairs(arr) {",
                "  for (let i = 0; i < arr.length; i++) {",
                "    for (let j = 0; j < arr.length; j++) {",
                "      print(arr[i] + \", \" + arr[j]);",
                "    }",
                "  }",
                "}",
            ],
            Exponential => &[
                "function fib(n) {",
                "  if (n <= 1) return n;",
                "  return fib(n - 1) + fib(n - 2);",
                "}",
            ],
        },
        Language::Python => match complexity {
            Constant => &[
                "def access_element(arr, index):",
                "    print(f\"Accessing element at {index}\")",
                "    return arr[index]",
            ],
            Logarithmic => &[
                "def binary_search(arr, target):",
                "    low, high = 0, len(arr) - 1",
                "    while low <= high:",
                "        mid = (low + high) // 2",
                "        if arr[mid] == target:",
                "            return mid",
                "        elif arr[mid] < target:",
                "            low = mid + 1",
                "        else:",
                "            high = mid - 1",
                "    return -1",
            ],
            Linear => &["def print_all(arr):", "    for item in arr:", "        print(item)"],
            Linearithmic => &[
                "def merge_sort(arr):",
                "    width = 1",
                "    while width < len(arr):",
                "        for i in range(len(arr)): place(arr, i, width)",
                "        width *= 2",
            ],
            Quadratic => &[
                "def print_pairs(arr):",
                "    for i in arr:",
                "        for j in arr:",
                "            print(f\"{i}, {j}\")",
            ],
            Exponential => &[
                "def fib(n):",
                "    if n <= 1:",
                "        return n",
                "    return fib(n - 1) + fib(n - 2)",
            ],
        },
        Language::Java => match complexity {
            Constant => &[
                "public int accessElement(int[] arr, int index) {",
                "    System.out.println(\"Accessing element at \" + index);",
                "    return arr[index];",
                "}",
            ],
            Logarithmic => &[
                "public int binarySearch(int[] arr, int target) {",
                "    int low = 0, high = arr.length - 1;",
                "    while (low <= high) {",
                "        int mid = low + (high - low) / 2;",
                "        if (arr[mid] == target) return mid;",
                "        else if (arr[mid] < target) low = mid + 1;",
                "        else high = mid - 1;",
                "    }",
                "    return -1;",
                "}",
            ],
            Linear => &[
                "public void printAll(int[] arr) {",
                "    for (int i = 0; i < arr.length; i++) {",
                "        System.out.println(arr[i]);",
                "    }",
                "}",
            ],
            Linearithmic => &[
                "public void mergeSort(int[] arr) {",
                "    for (int width = 1; width < arr.length; width *= 2) {",
                "        for (int i = 0; i < arr.length; i++) {",
                "            place(arr, i, width);",
                "        }",
                "    }",
                "}",
            ],
            Quadratic => &[
                "public void printPairs(int[] arr) {",
                "    for (int i = 0; i < arr.length; i++) {",
                "        for (int j = 0; j < arr.length; j++) {",
                "            System.out.println(arr[i] + \", \" + arr[j]);",
                "        }",
                "    }",
                "}",
            ],
            Exponential => &[
                "public int fib(int n) {",
                "    if (n <= 1) return n;",
                "    return fib(n - 1) + fib(n - 2);",
                "}",
            ],
        },
        Language::Cpp => match complexity {
            Constant => &[
                "int accessElement(vector<int>& arr, int index) {",
                "    cout << \"Accessing element at \" << index << endl;",
                "    return arr[index];",
                "}",
            ],
            Logarithmic => &[
                "int binarySearch(vector<int>& arr, int target) {",
                "    int low = 0, high = arr.size() - 1;",
                "    while (low <= high) {",
                "        int mid = low + (high - low) / 2;",
                "        if (arr[mid] == target) return mid;",
                "        else if (arr[mid] < target) low = mid + 1;",
                "        else high = mid - 1;",
                "    }",
                "    return -1;",
                "}",
            ],
            Linear => &[
                "void printAll(vector<int>& arr) {",
                "    for (int i = 0; i < arr.size(); i++) {",
                "        cout << arr[i] << endl;",
                "    }",
                "}",
            ],
            Linearithmic => &[
                "void mergeSort(vector<int>& arr) {",
                "    for (size_t width = 1; width < arr.size(); width *= 2) {",
                "        for (size_t i = 0; i < arr.size(); i++) {",
                "            place(arr, i, width);",
                "        }",
                "    }",
                "}",
            ],
            Quadratic => &[
                "void printPairs(vector<int>& arr) {",
                "    for (int i = 0; i < arr.size(); i++) {",
                "        for (int j = 0; j < arr.size(); j++) {",
                "            cout << arr[i] << \", \" << arr[j] << endl;",
                "        }",
                "    }",
                "}",
            ],
            Exponential => &[
                "int fib(int n) {",
                "    if (n <= 1) return n;",
                "    return fib(n - 1) + fib(n - 2);",
                "}",
            ],
        },
        Language::CSharp => match complexity {
            Constant => &[
                "public int AccessElement(int[] arr, int index) {",
                "    Console.WriteLine($\"Accessing element at {index}\");",
                "    return arr[index];",
                "}",
            ],
            Logarithmic => &[
                "public int BinarySearch(int[] arr, int target) {",
                "    int low = 0, high = arr.Length - 1;",
                "    while (low <= high) {",
                "        int mid = low + (high - low) / 2;",
                "        if (arr[mid] == target) return mid;",
                "        else if (arr[mid] < target) low = mid + 1;",
                "        else high = mid - 1;",
                "    }",
                "    return -1;",
                "}",
            ],
            Linear => &[
                "public void PrintAll(int[] arr) {",
                "    for (int i = 0; i < arr.Length; i++) {",
                "        Console.WriteLine(arr[i]);",
                "    }",
                "}",
            ],
            Linearithmic => &[
                "public void MergeSort(int[] arr) {",
                "    for (int width = 1; width < arr.Length; width *= 2) {",
                "        for (int i = 0; i < arr.Length; i++) {",
                "            Place(arr, i, width);",
                "        }",
                "    }",
                "}",
            ],
            Quadratic => &[
                "public void PrintPairs(int[] arr) {",
                "    for (int i = 0; i < arr.Length; i++) {",
                "        for (int j = 0; j < arr.Length; j++) {",
                "            Console.WriteLine($\"{arr[i]}, {arr[j]}\");",
                "        }",
                "    }",
                "}",
            ],
            Exponential => &[
                "public int Fib(int n) {",
                "    if (n <= 1) return n;",
                "    return Fib(n - 1) + Fib(n - 2);",
                "}",
            ],
        },
        Language::Go => match complexity {
            Constant => &[
                "func accessElement(arr []int, index int) int {",
                "    fmt.Printf(\"Accessing element at %d\\n\", index)",
                "    return arr[index]",
                "}",
            ],
            Logarithmic => &[
                "func binarySearch(arr []int, target int) int {",
                "    low, high := 0, len(arr)-1",
                "    for low <= high {",
                "        mid := low + (high-low)/2",
                "        if arr[mid] == target {",
                "            return mid",
                "        } else if arr[mid] < target {",
                "            low = mid + 1",
                "        } else {",
                "            high = mid - 1",
                "        }",
                "    }",
                "    return -1",
                "}",
            ],
            Linear => &[
                "func printAll(arr []int) {",
                "    for i := 0; i < len(arr); i++ {",
                "        fmt.Println(arr[i])",
                "    }",
                "}",
            ],
            Linearithmic => &[
                "func mergeSort(arr []int) {",
                "    for width := 1; width < len(arr); width *= 2 {",
                "        for i := 0; i < len(arr); i++ {",
                "            place(arr, i, width)",
                "        }",
                "    }",
                "}",
            ],
            Quadratic => &[
                "func printPairs(arr []int) {",
                "    for i := 0; i < len(arr); i++ {",
                "        for j := 0; j < len(arr); j++ {",
                "            fmt.Printf(\"%d, %d\\n\", arr[i], arr[j])",
                "        }",
                "    }",
                "}",
            ],
            Exponential => &[
                "func fib(n int) int {",
                "    if n <= 1 {",
                "        return n",
                "    }",
                "    return fib(n-1) + fib(n-2)",
                "}",
            ],
        },
        Language::Rust => match complexity {
            Constant => &[
                "fn access_element(arr: &Vec<i32>, index: usize) -> i32 {",
                "    println!(\"Accessing element at {}\", index);",
                "    arr[index]",
                "}",
            ],
            Logarithmic => &[
                "fn binary_search(arr: &Vec<i32>, target: i32) -> Option<usize> {",
                "    let mut low = 0;",
                "    let mut high = arr.len() - 1;",
                "    while low <= high {",
                "        let mid = low + (high - low) / 2;",
                "        if arr[mid] == target {",
                "            return Some(mid);",
                "        } else if arr[mid] < target {",
                "            low = mid + 1;",
                "        } else {",
                "            high = mid - 1;",
                "        }",
                "    }",
                "    None",
                "}",
            ],
            Linear => &[
                "fn print_all(arr: &Vec<i32>) {",
                "    for item in arr {",
                "        println!(\"{}\", item);",
                "    }",
                "}",
            ],
            Linearithmic => &[
                "fn merge_sort(arr: &mut Vec<i32>) {",
                "    let mut width = 1;",
                "    while width < arr.len() {",
                "        (0..arr.len()).for_each(|i| place(arr, i, width));",
                "        width *= 2;",
                "    }",
                "}",
            ],
            Quadratic => &[
                "fn print_pairs(arr: &Vec<i32>) {",
                "    for i in arr {",
                "        for j in arr {",
                "            println!(\"{}, {}\", i, j);",
                "        }",
                "    }",
                "}",
            ],
            Exponential => &[
                "fn fib(n: u32) -> u32 {",
                "    if n <= 1 {",
                "        return n;",
                "    }",
                "    fib(n - 1) + fib(n - 2)",
                "}",
            ],
        },
        Language::TypeScript => match complexity {
            Constant => &[
                "function accessElement(arr: number[], index: number): number {",
                "  console.log(`Accessing element at ${index}`);",
                "  return arr[index];",
                "}",
            ],
            Logarithmic => &[
                "function binarySearch(arr: number[], target: number): number {",
                "  let low = 0, high = arr.length - 1;",
                "  while (low <= high) {",
                "    const mid = Math.floor((low + high) / 2);",
                "    if (arr[mid] === target) return mid;",
                "    else if (arr[mid] < target) low = mid + 1;",
                "    else high = mid - 1;",
                "  }",
                "  return -1;",
                "}",
            ],
            Linear => &[
                "function printAll(arr: number[]): void {",
                "  for (let i = 0; i < arr.length; i++) {",
                "    console.log(arr[i]);",
                "  }",
                "}",
            ],
            Linearithmic => &[
                "function mergeSort(arr: number[]): void {",
                "  for (let width = 1; width < arr.length; width *= 2) {",
                "    for (let i = 0; i < arr.length; i++) {",
                "      place(arr, i, width);",
                "    }",
                "  }",
                "}",
            ],
            Quadratic => &[
                "function printPairs(arr: number[]): void {",
                "  for (let i = 0; i < arr.length; i++) {",
                "    for (let j = 0; j < arr.length; j++) {",
                "      console.log(`${arr[i]}, ${arr[j]}`);",
                "    }",
                "  }",
                "}",
            ],
            Exponential => &[
                "function fib(n: number): number {",
                "  if (n <= 1) return n;",
                "  return fib(n - 1) + fib(n - 2);",
                "}",
            ],
        },
    }
}
