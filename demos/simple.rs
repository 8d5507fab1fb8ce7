use pbxproj_core::{parse, serialize, SerializeOptions};

fn main() {
    let project = r#"
        // !$*UTF8*$!
        {
            archiveVersion = 1;
            objectVersion = 56;
            objects = {
                ABC123 /* AppDelegate.swift */ = {
                    isa = PBXFileReference;
                    path = AppDelegate.swift;
                    sourceTree = "<group>";
                };
            };
            rootObject = ABC123;
        }
    "#;

    match parse(project) {
        Ok(doc) => {
            println!("{}", serialize(&doc, &SerializeOptions::generated()));
            match doc.to_json() {
                Ok(json) => println!("\nAs JSON:\n{json}"),
                Err(e) => eprintln!("Failed to convert to JSON: {e}"),
            }
        }
        Err(e) => {
            eprintln!("Failed to parse project: {:?}", miette::Report::new(e));
        }
    }
}
