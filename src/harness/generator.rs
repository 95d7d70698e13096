//! Type-driven harness generation
//!
//! Assembles a self-contained `main.cpp` around the user's solution source:
//! a fixed dispatch table maps each parameter type to fixture-decoding
//! statements and the return type to a result-encoding expression, and the
//! driver skeleton enumerates fixture pairs, invokes the solution per case,
//! and reports pass/fail counts.
//!
//! Generation is a pure function of (solution source, fixture directory):
//! identical inputs always yield byte-identical harness text.

use std::path::Path;

use super::GenError;
use super::emitter::CppEmitter;
use super::signature::{self, Param, ParsedSignature, TypeTag};

/// Generate the full harness source for a solution file's contents and a
/// fixture directory.
///
/// A parameter or return type outside the vocabulary degrades to an explicit
/// placeholder identifier in the emitted slot, which the C++ compiler will
/// reject; the signature itself failing to parse is the only fatal case.
pub fn generate(user_source: &str, fixture_dir: &Path) -> Result<String, GenError> {
    let sig = signature::extract(user_source)?;

    let mut e = CppEmitter::new();
    emit_includes(&mut e, &sig);
    e.blank_line();

    // The user's source goes in verbatim so helper types and functions
    // (ListNode, TreeNode, their builders) stay in scope.
    e.write(user_source);
    if !user_source.ends_with('\n') {
        e.write("\n");
    }
    e.blank_line();

    emit_builder_prototypes(&mut e, &sig);
    emit_runtime(&mut e, &sig);
    emit_driver(&mut e, &sig, fixture_dir);

    Ok(e.finish())
}

/// All type tags appearing in the signature (parameters first, then return).
fn used_tags(sig: &ParsedSignature) -> Vec<&TypeTag> {
    let mut tags: Vec<&TypeTag> = sig.params.iter().map(|p| &p.tag).collect();
    tags.push(&sig.return_tag);
    tags
}

fn emit_includes(e: &mut CppEmitter, sig: &ParsedSignature) {
    for header in [
        "algorithm",
        "cctype",
        "filesystem",
        "fstream",
        "iostream",
        "sstream",
        "stdexcept",
        "string",
        "utility",
        "vector",
    ] {
        e.include(header);
    }
    // Level-order tree serialization walks with a queue
    if sig.return_tag == TypeTag::Tree {
        e.include("deque");
    }
    e.line("using namespace std;");
}

/// Forward declarations for the linked-structure builders. These are an
/// external capability contract: the solution file (or its runtime support)
/// must supply them, the generator never implements them.
fn emit_builder_prototypes(e: &mut CppEmitter, sig: &ParsedSignature) {
    let needs_list = sig.params.iter().any(|p| p.tag == TypeTag::LinkedList);
    let needs_tree = sig.params.iter().any(|p| p.tag == TypeTag::Tree);
    if !needs_list && !needs_tree {
        return;
    }
    e.comment("Builders supplied by the solution file or its runtime support");
    if needs_list {
        e.line("ListNode* createLinkedList(const vector<int>& values);");
    }
    if needs_tree {
        e.line("TreeNode* deserialize(const string& data);");
    }
    e.blank_line();
}

/// Fixture text helpers shared by every generated harness. Decoding accepts
/// both bare values and `name = value` lines, tolerates whitespace, and
/// strips brackets/quotes; encoding mirrors the same grammar.
const RUNTIME_BASE: &str = r#"namespace cph {

inline string trimText(const string& s) {
    size_t b = s.find_first_not_of(" \t\r\n");
    if (b == string::npos) return "";
    size_t e = s.find_last_not_of(" \t\r\n");
    return s.substr(b, e - b + 1);
}

// Value part of a fixture line: everything after the first '=', trimmed
inline string cleanValue(const string& s) {
    size_t eq = s.find('=');
    return trimText(eq == string::npos ? s : s.substr(eq + 1));
}

// Comparison form of fixture text: assignment stripped, whitespace removed
// outside quoted sections. Mirrors the canonical encoding, so a stored
// "[0, 1]" compares equal to an encoded "[0,1]".
inline string normalizeText(const string& s) {
    string v = cleanValue(s);
    string out;
    char quote = 0;
    for (char c : v) {
        if (quote) {
            out += c;
            if (c == quote) quote = 0;
            continue;
        }
        if (c == '"' || c == '\'') {
            quote = c;
            out += c;
        } else if (!isspace((unsigned char)c)) {
            out += c;
        }
    }
    return out;
}

inline string stripQuotes(const string& s) {
    string t = trimText(s);
    if (t.size() >= 2 && (t.front() == '"' || t.front() == '\'') && t.back() == t.front())
        return t.substr(1, t.size() - 2);
    return t;
}

inline string stripBrackets(const string& s) {
    string t = trimText(s);
    if (t.size() >= 2 && t.front() == '[' && t.back() == ']')
        return t.substr(1, t.size() - 2);
    return t;
}

// Commas nested in brackets or quoted sections never split
inline vector<string> splitTopLevel(const string& s) {
    vector<string> parts;
    string current;
    int depth = 0;
    char quote = 0;
    for (char c : s) {
        if (quote) {
            current += c;
            if (c == quote) quote = 0;
            continue;
        }
        if (c == '"' || c == '\'') quote = c;
        if (c == '[') depth++;
        if (c == ']') depth--;
        if (c == ',' && depth == 0) {
            parts.push_back(current);
            current.clear();
        } else {
            current += c;
        }
    }
    if (!trimText(current).empty()) parts.push_back(current);
    return parts;
}

inline long long parseInt(const string& s) { return stoll(cleanValue(s)); }

inline double parseFloat(const string& s) { return stod(cleanValue(s)); }

inline bool parseBool(const string& s) {
    string v = cleanValue(s);
    if (v == "true" || v == "1") return true;
    if (v == "false" || v == "0") return false;
    throw runtime_error("invalid boolean: " + v);
}

inline char parseChar(const string& s) {
    string v = stripQuotes(cleanValue(s));
    if (v.empty()) throw runtime_error("empty character value");
    return v[0];
}

inline string parseString(const string& s) { return stripQuotes(cleanValue(s)); }

inline vector<int> parseIntList(const string& s) {
    vector<int> out;
    for (const string& part : splitTopLevel(stripBrackets(cleanValue(s))))
        out.push_back((int)stoll(trimText(part)));
    return out;
}

inline vector<string> parseStringList(const string& s) {
    vector<string> out;
    for (const string& part : splitTopLevel(stripBrackets(cleanValue(s))))
        out.push_back(stripQuotes(part));
    return out;
}

inline vector<string> readLines(const string& path) {
    ifstream in(path);
    if (!in) throw runtime_error("cannot open " + path);
    vector<string> lines;
    string line;
    while (getline(in, line)) {
        if (!trimText(line).empty()) lines.push_back(line);
    }
    return lines;
}

inline string readAll(const string& path) {
    ifstream in(path);
    if (!in) throw runtime_error("cannot open " + path);
    ostringstream ss;
    ss << in.rdbuf();
    return ss.str();
}

// Numeric index of an input_<n>.txt filename, or -1 if the name has none
inline int parseIndex(const string& name) {
    size_t start = name.find('_');
    if (start == string::npos) return -1;
    size_t end = name.find('.', start);
    string digits = name.substr(start + 1, end == string::npos ? string::npos : end - start - 1);
    if (digits.empty()) return -1;
    for (char c : digits)
        if (!isdigit((unsigned char)c)) return -1;
    return stoi(digits);
}

inline const string& nextLine(const vector<string>& lines, size_t& cursor) {
    if (cursor >= lines.size()) throw runtime_error("ran out of input lines");
    return lines[cursor++];
}
"#;

/// Rows of matrix input may span lines; join until brackets balance.
const RUNTIME_BALANCED: &str = r#"
inline string nextBalanced(const vector<string>& lines, size_t& cursor) {
    string joined;
    int depth = 0;
    do {
        const string& line = nextLine(lines, cursor);
        joined += line;
        for (char c : line) {
            if (c == '[') depth++;
            if (c == ']') depth--;
        }
    } while (depth > 0 && cursor < lines.size());
    return joined;
}
"#;

/// Matrix decoding on top of `parseIntList`.
const RUNTIME_MATRIX: &str = r#"
inline vector<vector<int>> parseIntMatrix(const string& s) {
    vector<vector<int>> rows;
    string body = stripBrackets(cleanValue(s));
    string current;
    int depth = 0;
    for (char c : body) {
        if (c == '[') {
            depth++;
            current += c;
        } else if (c == ']') {
            depth--;
            current += c;
            if (depth == 0) {
                rows.push_back(parseIntList(current));
                current.clear();
            }
        } else if (depth > 0) {
            current += c;
        }
    }
    return rows;
}
"#;

const RUNTIME_BOOL_TEXT: &str = r#"
inline string boolToText(bool v) { return v ? "true" : "false"; }
"#;

const RUNTIME_FLOAT_TEXT: &str = r#"
inline string floatToText(double v) {
    ostringstream ss;
    ss << v;
    return ss.str();
}
"#;

const RUNTIME_QUOTE_TEXT: &str = r#"
inline string quoteText(const string& s) { return "\"" + s + "\""; }
"#;

const RUNTIME_VEC_TEXT: &str = r#"
inline void appendItem(ostringstream& ss, int v) { ss << v; }
inline void appendItem(ostringstream& ss, const string& v) { ss << '"' << v << '"'; }

template <typename T>
inline string vecToText(const vector<T>& v) {
    ostringstream ss;
    ss << "[";
    for (size_t i = 0; i < v.size(); i++) {
        if (i) ss << ",";
        appendItem(ss, v[i]);
    }
    ss << "]";
    return ss.str();
}
"#;

const RUNTIME_MATRIX_TEXT: &str = r#"
inline string matrixToText(const vector<vector<int>>& m) {
    ostringstream ss;
    ss << "[";
    for (size_t i = 0; i < m.size(); i++) {
        if (i) ss << ",";
        ss << vecToText(m[i]);
    }
    ss << "]";
    return ss.str();
}
"#;

const RUNTIME_LIST_TEXT: &str = r#"
inline string listToText(ListNode* head) {
    ostringstream ss;
    ss << "[";
    bool first = true;
    for (ListNode* cur = head; cur; cur = cur->next) {
        if (!first) ss << ",";
        ss << cur->val;
        first = false;
    }
    ss << "]";
    return ss.str();
}
"#;

const RUNTIME_TREE_TEXT: &str = r#"
inline string treeToText(TreeNode* root) {
    vector<string> cells;
    deque<TreeNode*> queue;
    queue.push_back(root);
    while (!queue.empty()) {
        TreeNode* node = queue.front();
        queue.pop_front();
        if (node) {
            cells.push_back(to_string(node->val));
            queue.push_back(node->left);
            queue.push_back(node->right);
        } else {
            cells.push_back("null");
        }
    }
    while (!cells.empty() && cells.back() == "null") cells.pop_back();
    ostringstream ss;
    ss << "[";
    for (size_t i = 0; i < cells.size(); i++) {
        if (i) ss << ",";
        ss << cells[i];
    }
    ss << "]";
    return ss.str();
}
"#;

/// Emit the `cph` runtime namespace, including only the helpers the
/// signature's types actually need.
fn emit_runtime(e: &mut CppEmitter, sig: &ParsedSignature) {
    e.write(RUNTIME_BASE);

    if sig.params.iter().any(|p| p.tag == TypeTag::IntMatrix) {
        e.write(RUNTIME_BALANCED);
    }
    if used_tags(sig).iter().any(|t| **t == TypeTag::IntMatrix) {
        e.write(RUNTIME_MATRIX);
    }

    match &sig.return_tag {
        TypeTag::Bool => e.write(RUNTIME_BOOL_TEXT),
        TypeTag::Float => e.write(RUNTIME_FLOAT_TEXT),
        TypeTag::Str => e.write(RUNTIME_QUOTE_TEXT),
        TypeTag::IntList | TypeTag::StrList => e.write(RUNTIME_VEC_TEXT),
        TypeTag::IntMatrix => {
            e.write(RUNTIME_VEC_TEXT);
            e.write(RUNTIME_MATRIX_TEXT);
        }
        TypeTag::LinkedList => e.write(RUNTIME_LIST_TEXT),
        TypeTag::Tree => e.write(RUNTIME_TREE_TEXT),
        _ => {}
    }

    e.blank_line();
    e.line("} // namespace cph");
    e.blank_line();
}

/// Decode statements binding one parameter from the current fixture's lines.
///
/// Every type consumes exactly one line except matrices (bracket-balanced,
/// possibly spanning lines). Unsupported types emit a placeholder identifier
/// the C++ compiler will reject, so the gap is visible at compile time
/// instead of silently dropping the parameter.
fn decode_statements(param: &Param) -> Vec<String> {
    let n = &param.name;
    match &param.tag {
        TypeTag::Int => vec![format!(
            "int {n} = (int)cph::parseInt(cph::nextLine(lines, cursor));"
        )],
        TypeTag::Float => vec![format!(
            "double {n} = cph::parseFloat(cph::nextLine(lines, cursor));"
        )],
        TypeTag::Bool => vec![format!(
            "bool {n} = cph::parseBool(cph::nextLine(lines, cursor));"
        )],
        TypeTag::Char => vec![format!(
            "char {n} = cph::parseChar(cph::nextLine(lines, cursor));"
        )],
        TypeTag::Str => vec![format!(
            "string {n} = cph::parseString(cph::nextLine(lines, cursor));"
        )],
        TypeTag::IntList => vec![format!(
            "vector<int> {n} = cph::parseIntList(cph::nextLine(lines, cursor));"
        )],
        TypeTag::StrList => vec![format!(
            "vector<string> {n} = cph::parseStringList(cph::nextLine(lines, cursor));"
        )],
        TypeTag::IntMatrix => vec![format!(
            "vector<vector<int>> {n} = cph::parseIntMatrix(cph::nextBalanced(lines, cursor));"
        )],
        TypeTag::LinkedList => vec![format!(
            "ListNode* {n} = createLinkedList(cph::parseIntList(cph::nextLine(lines, cursor)));"
        )],
        TypeTag::Tree => vec![format!(
            "TreeNode* {n} = deserialize(cph::cleanValue(cph::nextLine(lines, cursor)));"
        )],
        TypeTag::Unsupported(raw) => vec![
            format!("// unsupported parameter type: {raw}"),
            format!("UNSUPPORTED_PARAMETER_TYPE {n};"),
        ],
    }
}

/// Expression serializing the invocation result for comparison.
fn encode_expression(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Int => "to_string(result)".to_string(),
        TypeTag::Float => "cph::floatToText(result)".to_string(),
        TypeTag::Bool => "cph::boolToText(result)".to_string(),
        TypeTag::Char => "string(1, result)".to_string(),
        TypeTag::Str => "cph::quoteText(result)".to_string(),
        TypeTag::IntList | TypeTag::StrList => "cph::vecToText(result)".to_string(),
        TypeTag::IntMatrix => "cph::matrixToText(result)".to_string(),
        TypeTag::LinkedList => "cph::listToText(result)".to_string(),
        TypeTag::Tree => "cph::treeToText(result)".to_string(),
        TypeTag::Unsupported(_) => "UNSUPPORTED_RETURN_TYPE(result)".to_string(),
    }
}

fn cpp_string_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The driver: discover fixture pairs (sorted by numeric index so runs are
/// deterministic), decode, invoke, compare, report, and exit with the
/// failing-case count.
fn emit_driver(e: &mut CppEmitter, sig: &ParsedSignature, fixture_dir: &Path) {
    let call_args: Vec<&str> = sig.params.iter().map(|p| p.name.as_str()).collect();
    let invocation = if sig.is_member {
        format!("sol.{}({})", sig.name, call_args.join(", "))
    } else {
        format!("{}({})", sig.name, call_args.join(", "))
    };

    e.block("int main()", |e| {
        e.line(&format!(
            "const string testDir = \"{}\";",
            cpp_string_literal(&fixture_dir.display().to_string())
        ));
        e.line("vector<pair<int, string>> cases;");
        e.block(
            "for (const auto& entry : filesystem::directory_iterator(testDir))",
            |e| {
                e.line("string name = entry.path().filename().string();");
                e.line("if (name.rfind(\"input_\", 0) != 0) continue;");
                e.line("int index = cph::parseIndex(name);");
                e.line("if (index < 0) continue;");
                e.line("cases.push_back({index, entry.path().string()});");
            },
        );
        e.line("sort(cases.begin(), cases.end());");
        e.blank_line();
        e.line("int totalTests = 0;");
        e.line("int passedTests = 0;");
        e.block("for (const auto& [index, inputPath] : cases)", |e| {
            e.line("string expectedPath = inputPath;");
            e.line("expectedPath.replace(expectedPath.rfind(\"input_\"), 6, \"output_\");");
            e.block("if (!filesystem::exists(expectedPath))", |e| {
                e.line(
                    "cout << \"Test case \" << index << \": skipped (missing expected output)\" << endl;",
                );
                e.line("continue;");
            });
            e.line("totalTests++;");
            e.line("try {");
            e.indent();
            if !sig.params.is_empty() {
                e.line("vector<string> lines = cph::readLines(inputPath);");
                e.line("size_t cursor = 0;");
                for param in &sig.params {
                    for stmt in decode_statements(param) {
                        e.line(&stmt);
                    }
                }
            }
            e.line("string expected = cph::normalizeText(cph::readAll(expectedPath));");
            if sig.is_member {
                e.line("Solution sol;");
            }
            e.line(&format!("auto result = {};", invocation));
            e.line(&format!(
                "string actual = {};",
                encode_expression(&sig.return_tag)
            ));
            e.line("if (actual == expected) {");
            e.indent();
            e.line("cout << \"Test case \" << index << \": Passed\" << endl;");
            e.line("passedTests++;");
            e.dedent();
            e.line("} else {");
            e.indent();
            e.line("cout << \"Test case \" << index << \": Failed\" << endl;");
            e.line("cout << \"  Expected: \" << expected << endl;");
            e.line("cout << \"  Got:      \" << actual << endl;");
            e.dedent();
            e.line("}");
            e.dedent();
            e.line("} catch (const exception& ex) {");
            e.indent();
            e.line("cout << \"Test case \" << index << \": Error!\" << endl;");
            e.line("cout << \"  \" << ex.what() << endl;");
            e.dedent();
            e.line("}");
        });
        e.blank_line();
        e.line(
            "cout << \"\\nSummary: \" << passedTests << \"/\" << totalTests << \" test cases passed.\" << endl;",
        );
        e.line("return totalTests - passedTests;");
    });
}
