//! Parser integration tests.
//!
//! Verifies statement and expression structure, operator precedence and
//! associativity, the reconstruction round trip, and the error-recovery
//! contract.

use ahkls_ast::expr::Expr;
use ahkls_ast::stmt::{CaseNode, Stmt};
use ahkls_ast::suffix::Trailer;
use ahkls_ast::{SyntaxNode, TokenKind};
use ahkls_parser::{ParsedDocument, Parser};

/// Helper: parse a whole document.
fn parse(source: &str) -> ParsedDocument {
    Parser::new(source, "test.ahk").parse()
}

/// Helper: parse a document expected to be error-free and return its
/// statements.
fn parse_clean(source: &str) -> Vec<Stmt> {
    let doc = parse(source);
    assert!(
        doc.syntax_errors.is_empty(),
        "unexpected syntax errors in {:?}: {:?}",
        source,
        doc.syntax_errors
    );
    assert!(
        doc.token_errors.is_empty(),
        "unexpected token errors in {:?}: {:?}",
        source,
        doc.token_errors
    );
    doc.script.statements
}

/// Helper: parse a single expression.
fn parse_expr(source: &str) -> Expr {
    let (expr, errors) = Parser::new(source, "test.ahk").parse_expression();
    assert!(errors.is_empty(), "errors in {:?}: {:?}", source, errors);
    expr
}

fn as_binary(expr: &Expr) -> (&Expr, TokenKind, &Expr) {
    match expr {
        Expr::Binary(b) => (&b.left, b.operator.kind, &b.right),
        other => panic!("expected binary expression, got {other:?}"),
    }
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_expr("a + b * c");
    let (left, op, right) = as_binary(&expr);
    assert_eq!(op, TokenKind::Plus);
    assert!(matches!(left, Expr::Factor(_)));
    let (_, inner_op, _) = as_binary(right);
    assert_eq!(inner_op, TokenKind::Multiply);
}

#[test]
fn test_power_binds_tighter_than_multiplication() {
    let expr = parse_expr("a * b ** c");
    let (_, op, right) = as_binary(&expr);
    assert_eq!(op, TokenKind::Multiply);
    let (_, inner_op, _) = as_binary(right);
    assert_eq!(inner_op, TokenKind::Power);
}

#[test]
fn test_ternary_nests_on_false_branch() {
    let expr = parse_expr("a ? b : c ? d : e");
    let outer = match expr {
        Expr::Ternary(t) => t,
        other => panic!("expected ternary, got {other:?}"),
    };
    assert!(matches!(*outer.true_expr, Expr::Factor(_)));
    assert!(matches!(*outer.false_expr, Expr::Ternary(_)));
}

#[test]
fn test_assignment_in_expression_is_right_associative() {
    let expr = parse_expr("a := b := c");
    let (_, op, right) = as_binary(&expr);
    assert_eq!(op, TokenKind::Aassign);
    let (_, inner_op, _) = as_binary(right);
    assert_eq!(inner_op, TokenKind::Aassign);
}

#[test]
fn test_prefix_and_postfix_update_share_precedence() {
    // pins the reference behavior on `a++ + ++b`
    let expr = parse_expr("a++ + ++b");
    let (left, op, right) = as_binary(&expr);
    assert_eq!(op, TokenKind::Plus);
    match left {
        Expr::Unary(u) => assert!(u.is_postfix()),
        other => panic!("expected postfix unary, got {other:?}"),
    }
    match right {
        Expr::Unary(u) => assert!(!u.is_postfix()),
        other => panic!("expected prefix unary, got {other:?}"),
    }
}

#[test]
fn test_implicit_concatenation_of_adjacent_values() {
    let expr = parse_expr("a \"txt\"");
    let (_, op, _) = as_binary(&expr);
    assert_eq!(op, TokenKind::ImplicitConcat);
}

#[test]
fn test_implicit_concatenation_operator_is_zero_width() {
    let expr = parse_expr("a b");
    match &expr {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator.start, binary.operator.end);
            assert!(binary.operator.start >= binary.left.end());
            assert!(binary.operator.end <= binary.right.start());
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_explicit_concatenation_operator() {
    let expr = parse_expr("a . b");
    let (_, op, _) = as_binary(&expr);
    assert_eq!(op, TokenKind::Sconnect);
}

#[test]
fn test_grouping_overrides_precedence() {
    let expr = parse_expr("(a + b) * c");
    let (_, op, _) = as_binary(&expr);
    assert_eq!(op, TokenKind::Multiply);
}

#[test]
fn test_logical_operators_bind_looser_than_comparison() {
    let expr = parse_expr("a < b && c > d");
    let (_, op, _) = as_binary(&expr);
    assert_eq!(op, TokenKind::LogicAnd);
}

// ============================================================================
// Suffix terms and trailer chains
// ============================================================================

#[test]
fn test_dotted_chain_links() {
    let statements = parse_clean("a.b.c(1)\n");
    assert_eq!(statements.len(), 1);
    let factor = match &statements[0] {
        Stmt::ExprStmt(s) => match &s.expr {
            Expr::Factor(f) => f,
            other => panic!("expected factor, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    };

    let first = factor.trailer.as_ref().expect("chain should exist");
    assert_eq!(first.chain_len(), 2);
    let second = first.trailer.as_ref().expect("second link");
    assert!(second.trailer.is_none());
    assert_eq!(second.suffix_term.trailers.len(), 1);
    assert!(matches!(second.suffix_term.trailers[0], Trailer::Call(_)));
}

#[test]
fn test_empty_call_arguments_become_placeholders() {
    let statements = parse_clean("f(a,,b)\n");
    let factor = match &statements[0] {
        Stmt::ExprStmt(s) => match &s.expr {
            Expr::Factor(f) => f,
            other => panic!("expected factor, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    };
    let call = match &factor.suffix_term.trailers[0] {
        Trailer::Call(c) => c,
        other => panic!("expected call trailer, got {other:?}"),
    };
    assert_eq!(call.args.len(), 3);
    // the middle argument is a zero-width empty string literal
    assert_eq!(call.args[1].to_lines(), vec![String::new()]);
    assert_eq!(call.args[1].start(), call.args[1].end());
}

#[test]
fn test_index_and_call_trailers_in_source_order() {
    let statements = parse_clean("m[1](2)\n");
    let factor = match &statements[0] {
        Stmt::ExprStmt(s) => match &s.expr {
            Expr::Factor(f) => f,
            other => panic!("expected factor, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    };
    assert_eq!(factor.suffix_term.trailers.len(), 2);
    assert!(matches!(
        factor.suffix_term.trailers[0],
        Trailer::BracketIndex(_)
    ));
    assert!(matches!(factor.suffix_term.trailers[1], Trailer::Call(_)));
}

#[test]
fn test_percent_dereference_keeps_its_span() {
    let statements = parse_clean("x := %v%\n");
    match &statements[0] {
        Stmt::Assign(assign) => {
            assert_eq!(assign.expr.to_lines(), vec!["%v%".to_string()]);
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_array_and_associative_array_literals() {
    let statements = parse_clean("x := [1, 2, 3]\ny := {a: 1, b: 2}\n");
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].to_lines(), vec!["x := [1, 2, 3]".to_string()]);
    assert_eq!(
        statements[1].to_lines(),
        vec!["y := {a: 1, b: 2}".to_string()]
    );
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_function_definition_vs_call_disambiguation() {
    let statements = parse_clean("f(a, b) {\n}\n");
    match &statements[0] {
        Stmt::FuncDef(def) => {
            assert_eq!(def.name.content, "f");
            assert_eq!(def.params.params.len(), 2);
            assert!(def.body.statements.is_empty());
        }
        other => panic!("expected function definition, got {other:?}"),
    }

    let statements = parse_clean("f(a, b)\n");
    assert!(matches!(&statements[0], Stmt::ExprStmt(_)));
}

#[test]
fn test_function_definition_with_defaults_and_byref() {
    let statements = parse_clean("f(ByRef a, b := 1, c = 2) {\nreturn b\n}\n");
    match &statements[0] {
        Stmt::FuncDef(def) => {
            assert_eq!(def.params.params.len(), 3);
            assert!(def.params.params[0].byref.is_some());
            assert!(def.params.params[1].default.is_some());
            assert!(def.params.params[2].default.is_some());
        }
        other => panic!("expected function definition, got {other:?}"),
    }
}

#[test]
fn test_nested_parens_in_disambiguation_scan() {
    let statements = parse_clean("f(g(1), h(2)) {\n}\n");
    assert!(matches!(&statements[0], Stmt::FuncDef(_)));

    let statements = parse_clean("f(g(1), h(2))\n");
    assert!(matches!(&statements[0], Stmt::ExprStmt(_)));
}

#[test]
fn test_variable_declarations() {
    let statements = parse_clean("global x := 1, y, z := 3\n");
    match &statements[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.scope.kind, TokenKind::Global);
            assert_eq!(decl.bindings.len(), 3);
            assert!(decl.bindings[0].value.is_some());
            assert!(decl.bindings[1].value.is_none());
        }
        other => panic!("expected var declaration, got {other:?}"),
    }
}

#[test]
fn test_legacy_equals_assignment() {
    let statements = parse_clean("x = 1\n");
    match &statements[0] {
        Stmt::Assign(assign) => assert_eq!(assign.operator.kind, TokenKind::Equal),
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_compound_assignment() {
    let statements = parse_clean("x += 2\n");
    match &statements[0] {
        Stmt::Assign(assign) => assert_eq!(assign.operator.kind, TokenKind::PlusEqual),
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_property_target_assignment() {
    let statements = parse_clean("obj.count := 0\n");
    assert!(matches!(&statements[0], Stmt::Assign(_)));
}

#[test]
fn test_if_else_chain() {
    let statements = parse_clean("if x > 1\ny := 1\nelse if x < 0\ny := 2\nelse\ny := 3\n");
    let if_stmt = match &statements[0] {
        Stmt::If(s) => s,
        other => panic!("expected if, got {other:?}"),
    };
    let else_body = &if_stmt.else_stmt.as_ref().expect("else branch").body;
    assert!(matches!(**else_body, Stmt::If(_)));
}

#[test]
fn test_if_with_block_body() {
    let statements = parse_clean("if x {\ny := 1\n}\n");
    match &statements[0] {
        Stmt::If(s) => assert!(matches!(*s.body, Stmt::Block(_))),
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_while_statement() {
    let statements = parse_clean("while x > 0 {\nx -= 1\n}\n");
    assert!(matches!(&statements[0], Stmt::While(_)));
}

#[test]
fn test_loop_with_count_expression() {
    let statements = parse_clean("loop 5\nx += 1\n");
    match &statements[0] {
        Stmt::Loop(s) => assert!(s.condition.is_some()),
        other => panic!("expected loop, got {other:?}"),
    }
}

#[test]
fn test_loop_until() {
    let statements = parse_clean("loop {\nx += 1\n}\nuntil x > 3\n");
    assert!(matches!(&statements[0], Stmt::UntilLoop(_)));
}

#[test]
fn test_for_in_statement() {
    let statements = parse_clean("for k, v in obj\nx := k\n");
    match &statements[0] {
        Stmt::For(s) => {
            assert_eq!(s.id1.content, "k");
            assert_eq!(s.id2.as_ref().map(|t| t.content.as_str()), Some("v"));
        }
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn test_switch_with_cases_and_default() {
    let source = "switch x {\ncase 1, 2:\ny := 1\ncase 3:\ny := 2\ndefault:\ny := 3\n}\n";
    let statements = parse_clean(source);
    let switch = match &statements[0] {
        Stmt::Switch(s) => s,
        other => panic!("expected switch, got {other:?}"),
    };
    assert_eq!(switch.cases.len(), 3);
    match &switch.cases[0].case {
        CaseNode::Case(c) => assert_eq!(c.conditions.len(), 2),
        other => panic!("expected case arm, got {other:?}"),
    }
    assert!(matches!(&switch.cases[2].case, CaseNode::Default(_)));
    assert_eq!(switch.cases[2].statements.len(), 1);
}

#[test]
fn test_try_catch_finally() {
    let statements = parse_clean("try {\nf()\n}\ncatch e {\ng()\n}\nfinally {\nh()\n}\n");
    let try_stmt = match &statements[0] {
        Stmt::Try(s) => s,
        other => panic!("expected try, got {other:?}"),
    };
    let catch = try_stmt.catch_stmt.as_ref().expect("catch");
    assert_eq!(catch.variable.as_ref().map(|t| t.content.as_str()), Some("e"));
    assert!(try_stmt.finally_stmt.is_some());
}

#[test]
fn test_bare_catch_without_output_variable() {
    let statements = parse_clean("try {\nf()\n}\ncatch {\ng()\n}\n");
    match &statements[0] {
        Stmt::Try(s) => assert!(s.catch_stmt.as_ref().expect("catch").variable.is_none()),
        other => panic!("expected try, got {other:?}"),
    }
}

#[test]
fn test_class_definition_with_superclass() {
    let statements = parse_clean("class Window extends Gui {\nShow() {\nreturn 1\n}\n}\n");
    let class = match &statements[0] {
        Stmt::ClassDef(c) => c,
        other => panic!("expected class, got {other:?}"),
    };
    assert_eq!(class.name.content, "Window");
    assert_eq!(class.parent.as_ref().map(|t| t.content.as_str()), Some("Gui"));
    assert_eq!(class.body.statements.len(), 1);
}

#[test]
fn test_break_with_label_and_return_with_value() {
    let statements = parse_clean("break outer\nreturn x + 1\nreturn\n");
    assert_eq!(statements.len(), 3);
    match &statements[0] {
        Stmt::Break(b) => assert_eq!(b.label.as_ref().map(|t| t.content.as_str()), Some("outer")),
        other => panic!("expected break, got {other:?}"),
    }
    match (&statements[1], &statements[2]) {
        (Stmt::Return(with), Stmt::Return(without)) => {
            assert!(with.value.is_some());
            assert!(without.value.is_none());
        }
        other => panic!("expected returns, got {other:?}"),
    }
}

#[test]
fn test_label_statement() {
    let statements = parse_clean("retry_point:\nreturn\n");
    match &statements[0] {
        Stmt::Label(label) => assert_eq!(label.label_name(), "retry_point"),
        other => panic!("expected label, got {other:?}"),
    }
}

#[test]
fn test_hotkey_declaration() {
    let statements = parse_clean("^!c::\nreturn\n");
    match &statements[0] {
        Stmt::Hotkey(h) => {
            assert_eq!(h.key1.token.content, "^!c");
            assert!(h.key2.is_none());
        }
        other => panic!("expected hotkey, got {other:?}"),
    }
}

#[test]
fn test_combined_hotkey_declaration() {
    let statements = parse_clean("a & b::\nreturn\n");
    match &statements[0] {
        Stmt::Hotkey(h) => {
            assert_eq!(h.key1.token.content, "a");
            assert_eq!(h.key2.as_ref().map(|k| k.token.content.as_str()), Some("b"));
        }
        other => panic!("expected hotkey, got {other:?}"),
    }
}

#[test]
fn test_hotstring_declaration() {
    let statements = parse_clean(":*:btw::by the way\n");
    match &statements[0] {
        Stmt::HotString(h) => {
            assert_eq!(h.option.content, ":*:");
            assert_eq!(h.trigger.content, "btw::");
            assert_eq!(h.expansion.content, "by the way");
        }
        other => panic!("expected hotstring, got {other:?}"),
    }
}

#[test]
fn test_include_directive_registers_path() {
    let doc = parse("#Include lib\\utils.ahk\n#Include other.ahk\nx := 1\n");
    assert!(doc.syntax_errors.is_empty());
    let includes: Vec<&str> = doc.script.includes.iter().map(String::as_str).collect();
    assert_eq!(includes, vec!["lib\\utils.ahk", "other.ahk"]);
    assert_eq!(doc.script.statements.len(), 3);
}

#[test]
fn test_directive_with_expression_arguments() {
    let statements = parse_clean("#MaxThreads 255\n");
    match &statements[0] {
        Stmt::Directive(d) => {
            assert_eq!(d.token.content, "#MaxThreads");
            assert_eq!(d.args.len(), 1);
        }
        other => panic!("expected directive, got {other:?}"),
    }
}

#[test]
fn test_comments_attach_to_script_not_statements() {
    let doc = parse("; setup\nx := 1 ; trailing\n");
    assert!(doc.syntax_errors.is_empty());
    assert_eq!(doc.script.comments.len(), 2);
    assert_eq!(doc.script.statements.len(), 1);
}

// ============================================================================
// Line continuation (token buffer folding)
// ============================================================================

#[test]
fn test_operator_at_line_start_continues_expression() {
    let statements = parse_clean("x := 1\n + 2\n");
    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Stmt::Assign(assign) => {
            let (_, op, _) = as_binary(&assign.expr);
            assert_eq!(op, TokenKind::Plus);
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_comma_at_line_start_continues_list() {
    let statements = parse_clean("x := [1\n, 2\n, 3]\n");
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].to_lines(), vec!["x := [1, 2, 3]".to_string()]);
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_error_locality_one_diagnostic_per_malformed_region() {
    let doc = parse("x := 1\ny := (\nz := 3\n");
    assert_eq!(doc.syntax_errors.len(), 1, "{:?}", doc.syntax_errors);
    assert_eq!(doc.script.statements.len(), 3);
    assert!(matches!(&doc.script.statements[0], Stmt::Assign(_)));
    assert!(doc.script.statements[1].is_invalid());
    assert!(matches!(&doc.script.statements[2], Stmt::Assign(_)));
}

#[test]
fn test_invalid_statement_reconstructs_to_one_empty_line() {
    let doc = parse("y := (\n");
    assert!(doc.script.statements[0].is_invalid());
    assert_eq!(doc.script.statements[0].to_lines(), vec![String::new()]);
}

#[test]
fn test_two_malformed_regions_two_diagnostics() {
    let doc = parse("y := (\nx := 1\nz := )\nw := 2\n");
    assert_eq!(doc.syntax_errors.len(), 2, "{:?}", doc.syntax_errors);
    let valid = doc
        .script
        .statements
        .iter()
        .filter(|s| !s.is_invalid())
        .count();
    assert_eq!(valid, 2);
}

#[test]
fn test_pair_without_colon_keeps_siblings() {
    let doc = parse("x := {a: 1, b, c: 3}\n");
    assert_eq!(doc.syntax_errors.len(), 1);
    match &doc.script.statements[0] {
        Stmt::Assign(assign) => match &assign.expr {
            Expr::Factor(f) => match &f.suffix_term.atom {
                ahkls_ast::suffix::Atom::AssociativeArray(dict) => {
                    assert_eq!(dict.pairs.len(), 3);
                    assert!(dict.pairs[1].value.is_invalid());
                    assert!(!dict.pairs[2].value.is_invalid());
                }
                other => panic!("expected associative array, got {other:?}"),
            },
            other => panic!("expected factor, got {other:?}"),
        },
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_missing_trailer_atom_is_locally_recovered() {
    let (expr, errors) = Parser::new("a.", "test.ahk").parse_expression();
    assert_eq!(errors.len(), 1);
    match expr {
        Expr::Factor(f) => {
            let link = f.trailer.expect("trailer link");
            assert!(link.suffix_term.atom.is_invalid());
        }
        other => panic!("expected factor, got {other:?}"),
    }
}

#[test]
fn test_lexical_errors_are_forwarded() {
    let doc = parse("x := \"unterminated\n");
    assert_eq!(doc.token_errors.len(), 1);
}

#[test]
fn test_deep_nesting_degrades_to_empty_script() {
    let mut source = String::from("x := ");
    for _ in 0..300 {
        source.push('(');
    }
    source.push('1');
    for _ in 0..300 {
        source.push(')');
    }
    source.push('\n');

    let doc = parse(&source);
    assert!(doc.script.statements.is_empty());
    assert!(doc.syntax_errors.is_empty());
    assert!(doc.token_errors.is_empty());
}

#[test]
fn test_unknown_statement_recovers_at_next_line() {
    let doc = parse("+\nx := 1\n");
    assert!(!doc.syntax_errors.is_empty());
    assert!(doc
        .script
        .statements
        .iter()
        .any(|s| matches!(s, Stmt::Assign(_))));
}

// ============================================================================
// Single-unit entry points
// ============================================================================

#[test]
fn test_parse_one_statement_stops_after_the_first() {
    let (stmt, errors) = Parser::new("if x\ny := 1\nz := 2\n", "test.ahk").parse_statement();
    assert!(errors.is_empty(), "{errors:?}");
    match stmt {
        Stmt::If(if_stmt) => assert!(matches!(*if_stmt.body, Stmt::Assign(_))),
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_parse_one_expression_ignores_trailing_input() {
    let (expr, errors) = Parser::new("a + b\nc := 1\n", "test.ahk").parse_expression();
    assert!(errors.is_empty(), "{errors:?}");
    let (_, op, _) = as_binary(&expr);
    assert_eq!(op, TokenKind::Plus);
}

// ============================================================================
// Ranges
// ============================================================================

fn assert_constituents_contained(node: &dyn SyntaxNode) {
    let range = node.range();
    assert!(node.start() <= node.end());
    for constituent in node.ranges() {
        assert!(
            range.encloses(&constituent),
            "constituent {constituent:?} escapes {range:?}"
        );
    }
}

#[test]
fn test_ranges_are_monotonic_and_nested() {
    let source = "global x := 1\nif x > 0 {\ny := f(x, 2)\n}\nclass A {\n}\n";
    for stmt in parse_clean(source) {
        assert_constituents_contained(&stmt);
    }
}

#[test]
fn test_expression_ranges_nest() {
    let expr = parse_expr("a + b * (c - 1)");
    assert_constituents_contained(&expr);
    if let Expr::Binary(b) = &expr {
        assert_constituents_contained(b.left.as_ref());
        assert_constituents_contained(b.right.as_ref());
        assert!(b.left.end() <= b.operator.start);
        assert!(b.operator.end <= b.right.start());
    }
}

#[test]
fn test_statement_positions_follow_source_lines() {
    let statements = parse_clean("x := 1\ny := 2\n");
    assert_eq!(statements[0].start().line, 0);
    assert_eq!(statements[1].start().line, 1);
}

// ============================================================================
// Reconstruction round trip
// ============================================================================

/// Reconstruct a document from its statements' lines and reparse; the
/// reconstruction must be a fixpoint of the round trip.
fn assert_round_trip(source: &str) {
    let first = parse_clean(source);
    let rebuilt: String = first
        .iter()
        .flat_map(|s| s.to_lines())
        .map(|line| line + "\n")
        .collect();

    let second = parse_clean(&rebuilt);
    assert_eq!(first.len(), second.len(), "rebuilt: {rebuilt:?}");

    let relines: Vec<Vec<String>> = second.iter().map(|s| s.to_lines()).collect();
    let lines: Vec<Vec<String>> = first.iter().map(|s| s.to_lines()).collect();
    assert_eq!(lines, relines, "rebuilt: {rebuilt:?}");
}

#[test]
fn test_round_trip_assignments() {
    assert_round_trip("x := 1 + 2 * 3\ny := \"a\" . b\nz.prop := x ? 1 : 0\n");
}

#[test]
fn test_round_trip_literals() {
    assert_round_trip("x := [1, 2, 3]\ny := {a: 1, b: \"two\"}\nz := %v%\n");
}

#[test]
fn test_round_trip_calls_and_chains() {
    assert_round_trip("a.b.c(1)\nf(a,,b)\nm[1](2)\n");
}

#[test]
fn test_round_trip_control_flow() {
    assert_round_trip(
        "if x > 0 {\ny := 1\n}\nwhile x {\nx -= 1\n}\nloop 3\nf()\nfor k, v in obj\ng(k)\n",
    );
}

#[test]
fn test_round_trip_definitions() {
    assert_round_trip("f(a, b := 1) {\nreturn a + b\n}\nclass A extends B {\n}\n");
}

#[test]
fn test_round_trip_switch() {
    assert_round_trip("switch x {\ncase 1, 2:\ny := 1\ndefault:\ny := 2\n}\n");
}

#[test]
fn test_round_trip_hotkeys_and_directives() {
    assert_round_trip("#MaxThreads 255\n^!c::\nreturn\n:*:btw::by the way\nretry:\n");
}

#[test]
fn test_round_trip_try_and_until() {
    assert_round_trip("try {\nf()\n}\ncatch e {\ng(e)\n}\nloop {\nx += 1\n}\nuntil x > 5\n");
}
