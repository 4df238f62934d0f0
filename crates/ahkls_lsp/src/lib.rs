//! ahkls_lsp: Language Server Protocol front end.
//!
//! Thin editor binding over the parser: full-text document sync, a reparse
//! per change, published diagnostics, document symbols, and hover showing
//! the reconstructed statement under the cursor.

use ahkls_ast::stmt::Stmt;
use ahkls_ast::SyntaxNode;
use ahkls_parser::{ParsedDocument, Parser};
use dashmap::DashMap;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

/// One open document: the artifact of its last parse.
struct Document {
    parsed: ParsedDocument,
}

/// The LSP backend.
pub struct AhklsServer {
    client: Client,
    documents: DashMap<Url, Document>,
}

impl AhklsServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: DashMap::new(),
        }
    }

    fn reparse(&self, uri: &Url, text: &str) {
        let parsed = Parser::new(text, uri.as_str()).parse();
        self.documents.insert(uri.clone(), Document { parsed });
    }

    async fn publish_diagnostics(&self, uri: Url) {
        let diagnostics = match self.documents.get(&uri) {
            Some(doc) => doc
                .parsed
                .all_diagnostics()
                .into_iter()
                .map(|d| Diagnostic {
                    range: to_lsp_range(d.range),
                    severity: Some(match d.severity {
                        ahkls_diagnostics::Severity::Error => DiagnosticSeverity::ERROR,
                        ahkls_diagnostics::Severity::Warning => DiagnosticSeverity::WARNING,
                        ahkls_diagnostics::Severity::Information => {
                            DiagnosticSeverity::INFORMATION
                        }
                    }),
                    source: Some("ahkls".to_string()),
                    message: d.message,
                    ..Default::default()
                })
                .collect(),
            None => Vec::new(),
        };

        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }
}

fn to_lsp_position(pos: ahkls_core::Position) -> Position {
    Position::new(pos.line, pos.character)
}

fn to_lsp_range(range: ahkls_core::Range) -> Range {
    Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

fn from_lsp_position(pos: Position) -> ahkls_core::Position {
    ahkls_core::Position::new(pos.line, pos.character)
}

/// The innermost top-level statement covering a position.
fn statement_at(statements: &[Stmt], pos: ahkls_core::Position) -> Option<&Stmt> {
    statements
        .iter()
        .find(|stmt| stmt.range().contains_inclusive(pos))
}

fn symbol_of(stmt: &Stmt) -> Option<(String, SymbolKind, ahkls_core::Range)> {
    match stmt {
        Stmt::FuncDef(def) => Some((def.name.content.clone(), SymbolKind::FUNCTION, def.range())),
        Stmt::ClassDef(def) => Some((def.name.content.clone(), SymbolKind::CLASS, def.range())),
        Stmt::Label(label) => Some((
            label.label_name().to_string(),
            SymbolKind::CONSTANT,
            label.range(),
        )),
        Stmt::Hotkey(hotkey) => {
            let lines = hotkey.to_lines();
            Some((
                lines.first().cloned().unwrap_or_default(),
                SymbolKind::EVENT,
                hotkey.range(),
            ))
        }
        _ => None,
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for AhklsServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                        ..Default::default()
                    },
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "ahkls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "ahkls language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        self.reparse(&uri, &params.text_document.text);
        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        // full sync: the last change carries the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            self.reparse(&uri, &change.text);
        }
        self.publish_diagnostics(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri);
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Some(text) = params.text {
            self.reparse(&uri, &text);
        }
        self.publish_diagnostics(uri).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = from_lsp_position(params.text_document_position_params.position);

        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };
        let Some(stmt) = statement_at(&doc.parsed.script.statements, position) else {
            return Ok(None);
        };

        let reconstruction = stmt.to_lines().join("\n");
        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: format!("```autohotkey\n{reconstruction}\n```"),
            }),
            range: Some(to_lsp_range(stmt.range())),
        }))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };

        let symbols: Vec<SymbolInformation> = doc
            .parsed
            .script
            .statements
            .iter()
            .filter_map(symbol_of)
            .map(|(name, kind, range)| {
                #[allow(deprecated)]
                SymbolInformation {
                    name,
                    kind,
                    tags: None,
                    deprecated: None,
                    location: Location {
                        uri: uri.clone(),
                        range: to_lsp_range(range),
                    },
                    container_name: None,
                }
            })
            .collect();

        Ok(Some(DocumentSymbolResponse::Flat(symbols)))
    }
}

/// Start the LSP server over stdio.
pub async fn start_lsp_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(AhklsServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
