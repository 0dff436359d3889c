use meterdeck::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
