use graphqlc_plugin::protocol::{
    directive_location_descriptor_proto::Location, non_null_type_descriptor_proto, type_descriptor_proto,
    value_descriptor_proto::Value, DirectiveDescriptorProto, DirectiveLocationDescriptorProto,
    ExecutableDirectiveLocation, FieldDefinitionDescriptorProto, FileDescriptorGraphql,
    InputValueDefinitionDescriptorProto, InterfaceTypeDefinitionDescriptorProto, ListTypeDescriptorProto,
    TypeDescriptorProto, TypeSystemDirectiveLocation, ValueDescriptorProto,
};
use std::fmt::{self, Display, Write};

const INDENT: &str = "    ";

/// SDL for one compiled file: the schema block, then objects, input objects, interfaces,
/// unions, directive definitions, scalars and enums.
pub(crate) struct Sdl<'a>(pub &'a FileDescriptorGraphql);

impl Display for Sdl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Sdl(file) = self;
        let mut blocks = Blocks::default();

        if let Some(schema) = &file.schema {
            blocks.next(f)?;

            f.write_str("schema")?;
            render_directives(&schema.directives, f)?;
            f.write_str(" {\n")?;

            let roots = [
                ("query", &schema.query),
                ("mutation", &schema.mutation),
                ("subscription", &schema.subscription),
            ];

            for (operation, root) in roots {
                if let Some(root) = root {
                    writeln!(f, "{INDENT}{operation}: {}", root.name)?;
                }
            }

            f.write_str("}\n")?;
        }

        for object in &file.objects {
            blocks.next(f)?;
            render_description(f, &object.description, "")?;
            write!(f, "type {}", object.name)?;
            render_implements(&object.implements, f)?;
            render_directives(&object.directives, f)?;
            render_fields(&object.fields, f)?;
        }

        for input_object in &file.input_objects {
            blocks.next(f)?;
            render_description(f, &input_object.description, "")?;
            write!(f, "input {}", input_object.name)?;
            render_directives(&input_object.directives, f)?;

            if input_object.fields.is_empty() {
                f.write_str("\n")?;
                continue;
            }

            f.write_str(" {\n")?;
            for field in &input_object.fields {
                render_description(f, &field.description, INDENT)?;
                f.write_str(INDENT)?;
                render_input_value(field, f)?;
                f.write_str("\n")?;
            }
            f.write_str("}\n")?;
        }

        for interface in &file.interfaces {
            blocks.next(f)?;
            render_description(f, &interface.description, "")?;
            write!(f, "interface {}", interface.name)?;
            render_implements(&interface.implements, f)?;
            render_directives(&interface.directives, f)?;
            render_fields(&interface.fields, f)?;
        }

        for union in &file.unions {
            blocks.next(f)?;
            render_description(f, &union.description, "")?;
            write!(f, "union {}", union.name)?;
            render_directives(&union.directives, f)?;

            let mut members = union.member_types.iter().peekable();

            if members.peek().is_some() {
                f.write_str(" =")?;
            }

            while let Some(member) = members.next() {
                write!(f, " {}", member.name)?;

                if members.peek().is_some() {
                    f.write_str(" |")?;
                }
            }

            f.write_str("\n")?;
        }

        for directive in &file.directives {
            blocks.next(f)?;
            render_description(f, &directive.description, "")?;
            write!(f, "directive @{}", directive.name)?;
            render_arguments_definition(&directive.arguments, f)?;

            if directive.repeatable {
                f.write_str(" repeatable")?;
            }

            f.write_str(" on ")?;

            let mut locations = directive.locations.iter().filter_map(location_name).peekable();

            while let Some(location) = locations.next() {
                f.write_str(location)?;

                if locations.peek().is_some() {
                    f.write_str(" | ")?;
                }
            }

            f.write_str("\n")?;
        }

        for scalar in &file.scalars {
            blocks.next(f)?;
            render_description(f, &scalar.description, "")?;
            write!(f, "scalar {}", scalar.name)?;
            render_directives(&scalar.directives, f)?;
            f.write_str("\n")?;
        }

        for enum_type in &file.enums {
            blocks.next(f)?;
            render_description(f, &enum_type.description, "")?;
            write!(f, "enum {}", enum_type.name)?;
            render_directives(&enum_type.directives, f)?;

            if enum_type.values.is_empty() {
                f.write_str("\n")?;
                continue;
            }

            f.write_str(" {\n")?;
            for value in &enum_type.values {
                render_description(f, &value.description, INDENT)?;
                f.write_str(INDENT)?;
                f.write_str(&value.value)?;
                render_directives(&value.directives, f)?;
                f.write_str("\n")?;
            }
            f.write_str("}\n")?;
        }

        Ok(())
    }
}

/// Separates top level definitions with an empty line.
#[derive(Default)]
struct Blocks {
    started: bool,
}

impl Blocks {
    fn next(&mut self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if std::mem::replace(&mut self.started, true) {
            f.write_str("\n")?;
        }

        Ok(())
    }
}

fn render_description(f: &mut fmt::Formatter<'_>, description: &str, indentation: &str) -> fmt::Result {
    if description.is_empty() {
        return Ok(());
    }

    writeln!(f, r#"{indentation}""""#)?;

    for line in description.trim().lines() {
        if line.trim().is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indentation}{}", line.replace(r#"""""#, r#"\""""#))?;
        }
    }

    writeln!(f, r#"{indentation}""""#)
}

fn render_implements(interfaces: &[InterfaceTypeDefinitionDescriptorProto], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut interfaces = interfaces.iter().peekable();

    if interfaces.peek().is_some() {
        f.write_str(" implements")?;
    }

    while let Some(interface) = interfaces.next() {
        write!(f, " {}", interface.name)?;

        if interfaces.peek().is_some() {
            f.write_str(" &")?;
        }
    }

    Ok(())
}

/// Writes nothing but a newline for a type without fields.
fn render_fields(fields: &[FieldDefinitionDescriptorProto], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if fields.is_empty() {
        return f.write_str("\n");
    }

    f.write_str(" {\n")?;

    for field in fields {
        render_description(f, &field.description, INDENT)?;

        f.write_str(INDENT)?;
        f.write_str(&field.name)?;
        render_arguments_definition(&field.arguments, f)?;
        f.write_str(": ")?;
        render_type(field.r#type.as_ref(), f)?;
        render_directives(&field.directives, f)?;
        f.write_str("\n")?;
    }

    f.write_str("}\n")
}

fn render_arguments_definition(
    arguments: &[InputValueDefinitionDescriptorProto],
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }

    f.write_str("(")?;

    let mut arguments = arguments.iter().peekable();

    while let Some(argument) = arguments.next() {
        render_input_value(argument, f)?;

        if arguments.peek().is_some() {
            f.write_str(", ")?;
        }
    }

    f.write_str(")")
}

fn render_input_value(input_value: &InputValueDefinitionDescriptorProto, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&input_value.name)?;
    f.write_str(": ")?;
    render_type(input_value.r#type.as_ref(), f)?;

    if let Some(default_value) = &input_value.default_value {
        f.write_str(" = ")?;
        render_value(default_value, f)?;
    }

    render_directives(&input_value.directives, f)
}

fn render_type(ty: Option<&TypeDescriptorProto>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty.and_then(|ty| ty.r#type.as_ref()) {
        Some(type_descriptor_proto::Type::NamedType(named)) => f.write_str(&named.name),
        Some(type_descriptor_proto::Type::ListType(list)) => render_list_type(list, f),
        Some(type_descriptor_proto::Type::NonNullType(non_null)) => {
            match &non_null.r#type {
                Some(non_null_type_descriptor_proto::Type::NamedType(named)) => f.write_str(&named.name)?,
                Some(non_null_type_descriptor_proto::Type::ListType(list)) => render_list_type(list, f)?,
                None => return Err(fmt::Error),
            }

            f.write_str("!")
        }
        None => Err(fmt::Error),
    }
}

fn render_list_type(list: &ListTypeDescriptorProto, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    render_type(list.r#type.as_deref(), f)?;
    f.write_str("]")
}

fn render_directives(directives: &[DirectiveDescriptorProto], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for directive in directives {
        write!(f, " @{}", directive.name)?;

        if directive.arguments.is_empty() {
            continue;
        }

        f.write_str("(")?;

        let mut arguments = directive.arguments.iter().peekable();

        while let Some(argument) = arguments.next() {
            write!(f, "{}: ", argument.name)?;

            match &argument.value {
                Some(value) => render_value(value, f)?,
                None => f.write_str("null")?,
            }

            if arguments.peek().is_some() {
                f.write_str(", ")?;
            }
        }

        f.write_str(")")?;
    }

    Ok(())
}

fn render_value(value: &ValueDescriptorProto, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &value.value {
        Some(Value::VariableValue(variable)) => write!(f, "${}", variable.name),
        Some(Value::IntValue(n)) => Display::fmt(n, f),
        Some(Value::FloatValue(n)) => write!(f, "{n:.6}"),
        Some(Value::StringValue(s)) => write_quoted(f, s),
        Some(Value::BooleanValue(true)) => f.write_str("true"),
        Some(Value::BooleanValue(false)) => f.write_str("false"),
        Some(Value::NullValue(_)) | None => f.write_str("null"),
        Some(Value::EnumValue(symbol)) => f.write_str(&symbol.value),
        Some(Value::ListValue(list)) => {
            f.write_char('[')?;

            let mut values = list.values.iter().peekable();

            while let Some(value) = values.next() {
                render_value(value, f)?;

                if values.peek().is_some() {
                    f.write_str(", ")?;
                }
            }

            f.write_char(']')
        }
        Some(Value::ObjectValue(object)) => {
            f.write_char('{')?;

            let mut fields = object.fields.iter().peekable();

            while let Some(field) = fields.next() {
                write!(f, "{}: ", field.name)?;

                match &field.value {
                    Some(value) => render_value(value, f)?,
                    None => f.write_str("null")?,
                }

                if fields.peek().is_some() {
                    f.write_str(", ")?;
                }
            }

            f.write_char('}')
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\r' => f.write_str("\\r"),
            '\n' => f.write_str("\\n"),
            '\t' => f.write_str("\\t"),
            '\\' => f.write_str("\\\\"),
            '"' => f.write_str("\\\""),
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32),
            c => f.write_char(c),
        }?
    }
    f.write_char('"')
}

fn location_name(location: &DirectiveLocationDescriptorProto) -> Option<&'static str> {
    match location.location? {
        Location::ExecutableLocation(value) => ExecutableDirectiveLocation::try_from(value)
            .ok()
            .map(|location| location.as_str_name()),
        Location::TypeSystemLocation(value) => TypeSystemDirectiveLocation::try_from(value)
            .ok()
            .map(|location| location.as_str_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphqlc_plugin::{protocol::Version, RequestAssembler};
    use indoc::indoc;

    fn echo(sdl: &str) -> String {
        let file = graphqlc_descriptor::compile("schema.graphql", sdl).unwrap();
        let assembler = RequestAssembler::new(Version::default(), &[file]);

        Sdl(&assembler.files()[0]).to_string()
    }

    #[test]
    fn synthesized_query() {
        insta::assert_snapshot!(echo("type Book { title: String! }"), @r###"
        schema {
            query: Query
        }

        type Book {
            title: String!
        }

        type Query
        "###);
    }

    #[test]
    fn empty_definitions_have_no_braces() {
        let sdl = indoc! {r#"
            type Query
            interface Node
            input Filter
            enum Genre
        "#};

        let echoed = echo(sdl);

        insta::assert_snapshot!(echoed, @r###"
        schema {
            query: Query
        }

        type Query

        input Filter

        interface Node

        enum Genre
        "###);
        assert_eq!(echo(&echoed), echoed);
    }

    #[test]
    fn triple_quotes_in_descriptions_are_escaped() {
        let sdl = indoc! {r#"
            type Query {
                """
                Wraps its argument in \""" like a block string.
                """
                quote(text: String): String
            }
        "#};

        let echoed = echo(sdl);

        insta::assert_snapshot!(echoed, @r###"
        schema {
            query: Query
        }

        type Query {
            """
            Wraps its argument in \""" like a block string.
            """
            quote(text: String): String
        }
        "###);
        assert_eq!(echo(&echoed), echoed);
    }

    #[test]
    fn every_kind_of_definition() {
        let sdl = indoc! {r#"
            """
            Something with a name.
            """
            interface Node { id: ID! }

            type Query implements Node {
              id: ID!
              "Find books."
              books(first: Int = 10, genre: Genre = FICTION, ratio: Float = 0.5): [Book!]! @deprecated(reason: "use \"search\"")
              search(filter: Filter): SearchResult
            }

            type Book implements Node { id: ID! title: String published: Date }
            type Author { name: String }

            union SearchResult = Book | Author

            input Filter { tags: [String!] = ["a", "b"], where: Range = {min: 1, max: null} }
            input Range { min: Int max: Int }

            enum Genre { FICTION @tag(name: "f") NON_FICTION }

            scalar Date @specifiedBy(url: "https://example.com/date")

            directive @tag(name: String!) repeatable on FIELD_DEFINITION | ENUM_VALUE | QUERY
        "#};

        insta::assert_snapshot!(echo(sdl), @r###"
        schema {
            query: Query
        }

        type Query implements Node {
            id: ID!
            """
            Find books.
            """
            books(first: Int = 10, genre: Genre = FICTION, ratio: Float = 0.500000): [Book!]! @deprecated(reason: "use \"search\"")
            search(filter: Filter): SearchResult
        }

        type Book implements Node {
            id: ID!
            title: String
            published: Date
        }

        type Author {
            name: String
        }

        input Filter {
            tags: [String!] = ["a", "b"]
            where: Range = {min: 1, max: null}
        }

        input Range {
            min: Int
            max: Int
        }

        """
        Something with a name.
        """
        interface Node {
            id: ID!
        }

        union SearchResult = Book | Author

        directive @tag(name: String!) repeatable on FIELD_DEFINITION | ENUM_VALUE | QUERY

        scalar Date @specifiedBy(url: "https://example.com/date")

        enum Genre {
            FICTION @tag(name: "f")
            NON_FICTION
        }
        "###);
    }

    #[test]
    fn explicit_roots() {
        let sdl = indoc! {r#"
            schema { query: Q mutation: M }
            type Q { a: Int }
            type M { b(input: [[Int]!]): Boolean }
        "#};

        insta::assert_snapshot!(echo(sdl), @r###"
        schema {
            query: Q
            mutation: M
        }

        type Q {
            a: Int
        }

        type M {
            b(input: [[Int]!]): Boolean
        }
        "###);
    }
}
